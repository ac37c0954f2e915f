//! Binary entry point for the `hostfacts` command-line tool.
//!
//! With no arguments every known fact is printed as `name => value`,
//! skipping facts that did not resolve. With a fact name only the bare
//! value is printed; an unresolved fact prints nothing and still exits 0,
//! since "unknown" is a normal outcome. Only an unrecognized fact name is
//! an error.

use anyhow::{bail, Result};
use clap::Parser;

use hostfacts::display::set_display_level;
use hostfacts::{displaylevel, kernel, processor, PlatformKind, Probe};

/// Facts this build knows how to resolve, in output order.
const FACT_NAMES: [&str; 3] = ["kernel", "kernelrelease", "physicalprocessorcount"];

#[derive(Parser)]
#[command(name = "hostfacts", version, about = "Best-effort host facts")]
struct Cli {
    /// Fact to print (all facts when omitted)
    fact: Option<String>,

    /// Resolve as if running on this platform
    /// (linux, windows, solaris, openbsd, other)
    #[arg(long, value_name = "OS")]
    platform: Option<PlatformKind>,

    /// Increase notification verbosity on stderr (-vv shows which data
    /// source resolved each fact)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Resolve one fact by name. `Ok(None)` means the fact is known but did not
/// resolve on this system.
fn fact_value(name: &str, platform: PlatformKind, probe: &Probe) -> Result<Option<String>> {
    Ok(match name {
        "kernel" => Some(platform.name().to_string()),
        "kernelrelease" => kernel::release(probe.runner),
        "physicalprocessorcount" => {
            processor::resolve(platform, probe).map(|n| n.to_string())
        }
        _ => bail!("unknown fact: {name} (known: {})", FACT_NAMES.join(", ")),
    })
}

/// Returns the process exit code.
fn run(cli: Cli) -> i32 {
    set_display_level(2 + u32::from(cli.verbose));
    let platform = cli.platform.unwrap_or_else(PlatformKind::detect);
    let probe = Probe::system();

    match cli.fact {
        Some(name) => match fact_value(&name, platform, &probe) {
            Ok(Some(value)) => {
                println!("{value}");
                0
            }
            Ok(None) => 0,
            Err(err) => {
                displaylevel!(1, "hostfacts: {err}");
                1
            }
        },
        None => {
            for name in FACT_NAMES {
                // Every name in FACT_NAMES is known, so only resolution
                // failures are possible here.
                if let Ok(Some(value)) = fact_value(name, platform, &probe) {
                    println!("{name} => {value}");
                }
            }
            0
        }
    }
}

fn main() {
    std::process::exit(run(Cli::parse()));
}
