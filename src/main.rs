use clap::{Arg, Command};
use log::{error, info};

use netacct::{
    config::Settings,
    network::{capture, Accountant},
    NetacctError, Result,
};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{}", err);
        eprintln!("ERROR: {}", err);
        std::process::exit(err.exit_code());
    }
}

fn run() -> Result<()> {
    let cmd = Command::new("netacct")
        .version("0.1.0")
        .about("Passive per-address network traffic accountant")
        .arg(
            Arg::new("interface")
                .value_name("INTERFACE")
                .help("Network interface to capture from")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .value_name("FILE")
                .help("Path the counter snapshot is published to")
                .required(true),
        )
        .arg(
            Arg::new("write-timeout")
                .value_name("SECONDS")
                .help("Seconds between counter snapshots (5-216000)")
                .required(true),
        )
        .arg(
            Arg::new("local-ips")
                .value_name("ADDRS")
                .help("Space-separated addresses excluded from attribution")
                .required(true),
        )
        .arg(
            Arg::new("local-nets")
                .value_name("PREFIXES")
                .help("Space-separated local network text prefixes")
                .required(true),
        );

    let matches = match cmd.try_get_matches() {
        Ok(matches) => matches,
        Err(err) if !err.use_stderr() => {
            // --help / --version
            err.print().ok();
            return Ok(());
        }
        Err(err) => return Err(NetacctError::Usage(err.to_string())),
    };

    let write_timeout: u64 = matches
        .get_one::<String>("write-timeout")
        .unwrap()
        .parse()
        .map_err(|_| {
            NetacctError::Usage("write timeout must be an integer number of seconds".to_string())
        })?;

    let settings = Settings::new(
        matches.get_one::<String>("interface").unwrap(),
        matches.get_one::<String>("output").unwrap(),
        write_timeout,
        matches.get_one::<String>("local-ips").unwrap(),
        matches.get_one::<String>("local-nets").unwrap(),
    )?;

    info!(
        "accounting {} -> {} every {}s ({} exclusions, {} prefixes)",
        settings.interface,
        settings.output_path.display(),
        settings.write_timeout,
        settings.addresses.local_ips.len(),
        settings.addresses.local_nets.len()
    );

    let interface = capture::find_interface(&settings.interface)?;
    let mut accountant = Accountant::new(&settings);
    capture::run(&interface, &mut accountant)
}
