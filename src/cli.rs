use clap::Parser;

#[derive(Parser)]
#[command(name = "storage-audit", about = "Find files and folders above a size threshold")]
pub struct Args {
    /// Directory to audit
    #[arg(default_value = ".")]
    pub path: String,

    /// Minimum aggregate size in bytes for an entry to be listed
    #[arg(short, long, default_value = "1000000000")]
    pub threshold: u64,

    /// Write the report here instead of the derived <path>-audit.txt name
    #[arg(short, long)]
    pub output: Option<String>,
}
