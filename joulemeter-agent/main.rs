use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use joulemeter::common::CPU_VENDOR;
use joulemeter::config::parse_core_list;
use joulemeter::raw::Vendor;
use joulemeter::{report, AgentError, EnergyReader, ReadConfig, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VendorArg {
    /// Detect the vendor from CPUID
    Auto,
    Intel,
    Amd,
}

#[derive(Parser, Debug)]
#[command(name = "joulemeter")]
#[command(about = "Read RAPL energy counters of Intel and AMD CPUs in joules")]
struct Args {
    #[arg(long, value_enum, default_value_t = VendorArg::Auto, help = "Register layout to use")]
    vendor: VendorArg,

    #[arg(
        long = "core",
        help = "Cores to read (supports ranges and comma-separated lists: --core 0-3,5 or --core 0 --core 2)",
        action = clap::ArgAction::Append
    )]
    cores: Vec<String>,

    #[arg(
        long = "path",
        help = "Register file to read instead of /dev/cpu/<core>/msr (can be specified multiple times)",
        action = clap::ArgAction::Append
    )]
    paths: Vec<PathBuf>,

    #[arg(long, help = "Print readings as JSON")]
    json: bool,

    #[arg(
        short,
        long,
        help = "Enable verbose logging (shows every register read)"
    )]
    verbose: bool,
}

fn check_permissions(config: &ReadConfig) {
    if !nix::unistd::geteuid().is_root() {
        tracing::warn!("Not running as root, MSR files usually require root or CAP_SYS_RAWIO");
    }

    if let Some(location) = config.first_cpu_location() {
        if std::fs::metadata(&location.path).is_err() {
            tracing::warn!(
                "Cannot access {}, the msr kernel module may not be loaded (run: sudo modprobe msr)",
                location.path.display()
            );
        }
    }
}

fn resolve_vendor(arg: VendorArg) -> Result<Vendor> {
    match arg {
        VendorArg::Intel => Ok(Vendor::Intel),
        VendorArg::Amd => Ok(Vendor::Amd),
        VendorArg::Auto => CPU_VENDOR.energy_vendor(),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging based on verbose flag
    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let vendor = resolve_vendor(args.vendor)?;
    let cores = parse_core_list(&args.cores)?;
    let config = ReadConfig::from_sources(vendor, &cores, &args.paths);

    tracing::info!(
        "Reading {} energy registers from {} locations",
        vendor,
        config.locations.len()
    );

    check_permissions(&config);

    let reader = EnergyReader::new(config);
    let readings = reader.read_all();

    let output = if args.json {
        report::render_json(&readings)? + "\n"
    } else {
        report::render_text(&readings)
    };
    std::io::stdout().lock().write_all(output.as_bytes())?;

    let failed = report::failed_count(&readings);
    if failed > 0 {
        return Err(AgentError::ReadFailed {
            failed,
            total: readings.len(),
        });
    }

    Ok(())
}
