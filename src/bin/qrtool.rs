use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use qnote_qr::decoder::read_symbol;
use qnote_qr::render::{share_image, to_image, to_text};
use qnote_qr::{EncoderConfig, MaskSelection, OverflowPolicy, QrEncoder, QrSymbol, RenderConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QNote share-link QR tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct EncodeOpts {
    /// Text to encode (at most 17 bytes unless --truncate)
    text: String,
    /// Mask pattern 0-7, or "auto"
    #[arg(long)]
    mask: Option<MaskSelection>,
    /// Shorten over-capacity input instead of failing
    #[arg(long)]
    truncate: bool,
}

impl EncodeOpts {
    fn config(&self) -> anyhow::Result<EncoderConfig> {
        let mut config = EncoderConfig::from_env().context("invalid QR_* environment")?;
        if let Some(mask) = self.mask {
            config = config.with_mask(mask);
        }
        if self.truncate {
            config = config.with_overflow(OverflowPolicy::Truncate);
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Encode text and write a PNG
    Encode {
        #[command(flatten)]
        opts: EncodeOpts,
        #[arg(long, default_value = "qr.png")]
        out: PathBuf,
        #[arg(long)]
        scale: Option<u32>,
        #[arg(long)]
        quiet_zone: Option<u32>,
        /// Write the placeholder image instead of failing
        #[arg(long)]
        fallback: bool,
    },
    /// Print the code to the terminal
    Show {
        #[command(flatten)]
        opts: EncodeOpts,
    },
    /// Encode, read back and compare
    Verify {
        #[command(flatten)]
        opts: EncodeOpts,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("qnote_qr=info,qrtool=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            opts,
            out,
            scale,
            quiet_zone,
            fallback,
        } => {
            let mut render = RenderConfig::from_env();
            if let Some(scale) = scale {
                render = render.with_scale(scale);
            }
            if let Some(quiet_zone) = quiet_zone {
                render = render.with_quiet_zone(quiet_zone);
            }
            encode_cmd(&opts, &render, &out, fallback)
        }
        Command::Show { opts } => show_cmd(&opts),
        Command::Verify { opts } => verify_cmd(&opts),
    }
}

fn encode_symbol(opts: &EncodeOpts) -> anyhow::Result<QrSymbol> {
    let symbol = QrEncoder::new(opts.config()?)
        .encode(&opts.text)
        .with_context(|| format!("failed to encode {:?}", opts.text))?;
    if let Some(t) = symbol.truncation {
        eprintln!(
            "warning: input truncated from {} to {} bytes",
            t.original_len, t.encoded_len
        );
    }
    Ok(symbol)
}

fn encode_cmd(
    opts: &EncodeOpts,
    render: &RenderConfig,
    out: &Path,
    fallback: bool,
) -> anyhow::Result<()> {
    let image = if fallback {
        let result = share_image(&opts.text, &opts.config()?, render);
        if result.is_placeholder() {
            eprintln!("warning: wrote placeholder image");
        }
        result.image().clone()
    } else {
        to_image(&encode_symbol(opts)?, render)
    };

    image
        .save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("Wrote {} ({}x{})", out.display(), image.width(), image.height());
    Ok(())
}

fn show_cmd(opts: &EncodeOpts) -> anyhow::Result<()> {
    let symbol = encode_symbol(opts)?;
    print!("{}", to_text(&symbol, 2));
    println!("mask={} ec_level={:?}", symbol.mask_pattern.index(), symbol.error_correction);
    Ok(())
}

fn verify_cmd(opts: &EncodeOpts) -> anyhow::Result<()> {
    let symbol = encode_symbol(opts)?;
    let decoded = read_symbol(&symbol.modules).context("read-back failed")?;
    let matches = decoded.payload == symbol.payload;
    println!(
        "mask={} ec_level={:?} payload={:?} round_trip={}",
        decoded.mask_pattern.index(),
        decoded.ec_level,
        String::from_utf8_lossy(&decoded.payload),
        if matches { "ok" } else { "MISMATCH" }
    );
    anyhow::ensure!(matches, "decoded payload differs from input");
    Ok(())
}
