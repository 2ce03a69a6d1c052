use std::path::PathBuf;

use clap::Parser;
use kanji_core::KANJIDIC_SOURCE_URL;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kanjidic-build",
    version,
    about = "Convert a kanjidic TSV table into the flashcard JSON document"
)]
pub struct Cli {
    /// kanjidic TSV file
    pub kanjidic: PathBuf,

    /// Write the document here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Provenance recorded in the document
    #[arg(long, default_value = KANJIDIC_SOURCE_URL)]
    pub source_url: String,
}
