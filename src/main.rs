use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use huffman_roundtrip::{huffman_roundtrip, RoundTrip};

#[derive(Parser)]
#[command(name = "huffman-roundtrip")]
#[command(about = "Build a Huffman code for a text, encode it and decode it back")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Codes, encoded bit-string and decoded text
    huffman-roundtrip "abracadabra"

    # Same, as JSON
    huffman-roundtrip "abracadabra" --format json

    # Also dump the tree
    huffman-roundtrip "abracadabra" --tree
"#)]
struct Cli {
    /// Text to encode
    text: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print the Huffman tree structure
    #[arg(long)]
    tree: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let fallback = match cli.verbose {
        0 => "huffman_roundtrip=warn",
        1 => "huffman_roundtrip=info",
        2 => "huffman_roundtrip=debug",
        _ => "huffman_roundtrip=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let rt = huffman_roundtrip(&cli.text)?;

    match cli.format {
        Format::Text => print_text(&rt, cli.tree),
        Format::Json => println!("{}", serde_json::to_string_pretty(&rt.summary())?),
    }

    Ok(())
}

fn print_text(rt: &RoundTrip, show_tree: bool) {
    if rt.original.is_empty() {
        println!("Nothing to encode.");
        return;
    }

    println!("Size of original text : {} bits", rt.original_bits());

    if show_tree {
        if let Some(tree) = &rt.tree {
            println!();
            print!("{}", tree.render_structure());
        }
    }

    println!("\nHuffman codes:\n");
    for (symbol, code) in rt.code_table.iter().flat_map(|table| table.iter()) {
        println!("{:?} {}", symbol, code);
    }

    println!("\nThe original string is : {}", rt.original);
    println!("\nThe encoded string is : {}", rt.encoded);
    println!("\nSize of encoded string : {} bits", rt.encoded_bits());
    if let Some(ratio) = rt.compression_ratio() {
        println!("Compression ratio : {:.1}%", ratio * 100.0);
    }
    println!("\nThe decoded string is : {}", rt.decoded);
}
