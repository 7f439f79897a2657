use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};

use crate::pak::EmptyFilePolicy;

#[derive(Parser, Debug)]
#[command(name = "kpak")]
#[command(version)]
#[command(about = "A Rust tool for managing Quake PAK files", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["extract", "pack", "list"])))]
#[command(after_help = "Examples:\n  \
  kpak -x resources.pak          extract resources.pak into ./resources\n  \
  kpak -p assets -o game.pak     pack every file under assets/ into game.pak\n  \
  kpak -l resources.pak          list the entries of resources.pak")]
pub struct Cli {
    /// Input path: a PAK file for -x/-l, a folder for -p
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Extract the PAK file (output = folder to extract to)
    #[arg(short = 'x', long)]
    pub extract: bool,

    /// Put all files from the input folder into a PAK file (output = PAK file path)
    #[arg(short = 'p', long)]
    pub pack: bool,

    /// List the entries of the input PAK file (does not use output)
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Output path. If not provided, current path + file/folder name based on input
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Archive zero-byte files instead of failing on them
    #[arg(long)]
    pub allow_empty: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Extract,
    Pack,
    List,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.extract {
            Mode::Extract
        } else if self.pack {
            Mode::Pack
        } else {
            Mode::List
        }
    }

    /// Output path for the selected mode, derived from the input if not given.
    pub fn output_path(&self) -> PathBuf {
        if let Some(ref output) = self.output {
            return output.clone();
        }

        let name = name_from_path(&self.input);
        match self.mode() {
            Mode::Pack => PathBuf::from(format!("{}.pak", name)),
            _ => PathBuf::from(name),
        }
    }

    pub fn empty_file_policy(&self) -> EmptyFilePolicy {
        if self.allow_empty {
            EmptyFilePolicy::Include
        } else {
            EmptyFilePolicy::Reject
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.quiet {
            0 => "info",
            1 => "warn",
            _ => "error",
        }
    }
}

/// Last path component with its final extension removed.
pub fn name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("kpak").chain(args.iter().copied()))
    }

    #[test]
    fn exactly_one_mode_is_required() {
        assert!(parse(&["in.pak"]).is_err());
        assert!(parse(&["-x", "-l", "in.pak"]).is_err());
        assert_eq!(parse(&["-l", "in.pak"]).unwrap().mode(), Mode::List);
    }

    #[test]
    fn derives_output_from_input() {
        let cli = parse(&["-x", "data/resources.pak"]).unwrap();
        assert_eq!(cli.output_path(), PathBuf::from("resources"));

        let cli = parse(&["-p", "assets/"]).unwrap();
        assert_eq!(cli.output_path(), PathBuf::from("assets.pak"));

        let cli = parse(&["-p", "assets", "-o", "out/game.pak"]).unwrap();
        assert_eq!(cli.output_path(), PathBuf::from("out/game.pak"));
    }

    #[test]
    fn name_strips_only_last_extension() {
        assert_eq!(name_from_path(Path::new("a.tar.pak")), "a.tar");
        assert_eq!(name_from_path(Path::new("noext")), "noext");
    }

    #[test]
    fn allow_empty_switches_policy() {
        let cli = parse(&["-p", "--allow-empty", "assets"]).unwrap();
        assert_eq!(cli.empty_file_policy(), EmptyFilePolicy::Include);
        assert_eq!(cli.log_filter(), "info");
        let cli = parse(&["-p", "-qq", "assets"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }
}
