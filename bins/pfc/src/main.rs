//! dcb-pfc: show IEEE 802.1Qbb priority flow control state of an interface.
//!
//! Queries the kernel's DCB netlink interface (`DCB_CMD_IEEE_GET`) and prints
//! the PFC capability, enable mask and per-traffic-class pause frame counters.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dcbnl::netlink::dcb::{DcbReply, IEEE_8021QAZ_MAX_TCS, IeeePfc, ResponseDecoder, ShortPfcPolicy};
use dcbnl::netlink::{Connection, Route};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dcb-pfc", version, about = "Show IEEE 802.1Qbb PFC state and counters")]
struct Cli {
    /// Interface name.
    ifname: String,

    /// Output JSON.
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long)]
    pretty: bool,

    /// Skip a PFC attribute shorter than struct ieee_pfc instead of failing.
    #[arg(long)]
    skip_short_pfc: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let conn = Connection::<Route>::new().context("netlink dial")?;

    let policy = if cli.skip_short_pfc {
        ShortPfcPolicy::Skip
    } else {
        ShortPfcPolicy::Fail
    };
    let decoder = ResponseDecoder::new().short_pfc(policy);

    let replies = match conn.get_ieee_pfc_with(&cli.ifname, &decoder).await {
        Ok(replies) => replies,
        // Kernel errors already name the interface and operation
        Err(e) if e.errno().is_some() => {
            // virtual iface, such as bond, lo etc.
            if e.is_not_found() || e.is_not_supported() {
                tracing::warn!("{}", e);
            }
            return Err(e.into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("ifname: {}, get ieee pfc", cli.ifname));
        }
    };

    if cli.json {
        print_json(&replies, cli.pretty)
    } else {
        for reply in &replies {
            print_text(reply);
        }
        Ok(())
    }
}

fn print_json(replies: &[DcbReply], pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(replies)?
    } else {
        serde_json::to_string(replies)?
    };
    println!("{}", out);
    Ok(())
}

fn print_text(reply: &DcbReply) {
    if let Some(ifname) = &reply.ifname {
        println!("ifname: {}", ifname);
    }
    if let Some(pfc) = &reply.ieee_pfc {
        print_pfc(pfc);
    }
}

fn print_pfc(pfc: &IeeePfc) {
    println!(
        "ieee pfc: cap {} enabled {:#04x} mbc {} delay {}",
        pfc.pfc_cap, pfc.pfc_en, pfc.mbc, pfc.delay
    );
    println!("\t{:<4} {:<4} {:>20} {:>20}", "tc", "pfc", "requests", "indications");
    for tc in 0..IEEE_8021QAZ_MAX_TCS {
        println!(
            "\t{:<4} {:<4} {:>20} {:>20}",
            tc,
            if pfc.enabled(tc) { "on" } else { "off" },
            pfc.requests[tc],
            pfc.indications[tc]
        );
    }
}
