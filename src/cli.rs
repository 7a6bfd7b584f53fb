use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "go-extractor",
    version,
    about = "Extract HTTP routes and GORM models from a Go file",
    after_help = r#"Examples:
  go-extractor internal/api/routes.go
  go-extractor --compact models/user.go
  go-extractor --schema
  RUST_LOG=debug go-extractor main.go
"#
)]
pub struct Args {
    /// Go source file to analyze.
    pub path: Option<PathBuf>,
    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,
    /// Print the JSON Schema of the output document and exit.
    #[arg(long)]
    pub schema: bool,
}
