use crate::error::UsageError;
use clap::{CommandFactory, Parser};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Bytes read from the input per chunk.
pub const BUFFER_SIZE: usize = 1024;

/// Paths of this many bytes or more are rejected (Linux `PATH_MAX`).
pub const MAX_PATH_LEN: usize = 4096;

const INPUT_FLAG: &str = "--input";
const OUTPUT_FLAG: &str = "--output";

#[derive(Parser, Debug)]
#[command(
    name = "copyfile",
    about = "Copy the contents of one file to another",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CLIArgs {
    #[arg(
        long,
        value_name = "input_file_path",
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString),
        help = "File to read from"
    )]
    pub input: OsString,

    #[arg(
        long,
        value_name = "output_file_path",
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString),
        help = "File to write to (created or truncated)"
    )]
    pub output: OsString,
}

/// The two paths of a single copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyOptions {
    pub chunk_size: usize,
    pub max_path_len: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            chunk_size: BUFFER_SIZE,
            max_path_len: MAX_PATH_LEN,
        }
    }
}

impl CLIArgs {
    /// Parse the process arguments into an [`Invocation`].
    pub fn parse(options: &CopyOptions) -> Result<Invocation, UsageError> {
        Self::parse_args(std::env::args_os(), options)
    }

    /// Accepts exactly `<program> --input <path> --output <path>`, in that order.
    pub fn parse_args<I, T>(args: I, options: &CopyOptions) -> Result<Invocation, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        check_shape(&args)?;

        let parsed = <Self as Parser>::try_parse_from(&args).map_err(|e| {
            UsageError::Invalid(e.kind().as_str().unwrap_or("invalid arguments").to_string())
        })?;

        check_path_len(INPUT_FLAG, &parsed.input, options.max_path_len)?;
        check_path_len(OUTPUT_FLAG, &parsed.output, options.max_path_len)?;

        // Empty paths pass through and fail when opened.
        Ok(Invocation {
            input: PathBuf::from(parsed.input),
            output: PathBuf::from(parsed.output),
        })
    }

    /// One-line usage text, e.g. `Usage: copyfile --input <input_file_path> ...`.
    pub fn usage() -> String {
        <Self as CommandFactory>::command()
            .render_usage()
            .to_string()
    }
}

fn check_shape(args: &[OsString]) -> Result<(), UsageError> {
    let count = args.len().saturating_sub(1);
    if count != 4 {
        return Err(UsageError::WrongArgumentCount(count));
    }
    for (position, expected) in [(1, INPUT_FLAG), (3, OUTPUT_FLAG)] {
        if args[position].as_os_str() != OsStr::new(expected) {
            return Err(UsageError::UnexpectedFlag {
                position,
                expected,
                found: args[position].to_string_lossy().into_owned(),
            });
        }
    }
    Ok(())
}

fn check_path_len(flag: &'static str, path: &OsStr, max: usize) -> Result<(), UsageError> {
    if path.len() >= max {
        return Err(UsageError::PathTooLong {
            flag,
            len: path.len(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, UsageError> {
        CLIArgs::parse_args(args.iter().copied(), &CopyOptions::default())
    }

    #[test]
    fn test_parse_valid_invocation() {
        let invocation = parse(&["copyfile", "--input", "a.txt", "--output", "b.txt"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("a.txt"));
        assert_eq!(invocation.output, PathBuf::from("b.txt"));
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&["copyfile"]), Err(UsageError::WrongArgumentCount(0)));
    }

    #[test]
    fn test_parse_missing_output_value() {
        assert_eq!(
            parse(&["copyfile", "--input", "a.txt", "--output"]),
            Err(UsageError::WrongArgumentCount(3))
        );
    }

    #[test]
    fn test_parse_extra_token() {
        assert_eq!(
            parse(&["copyfile", "--input", "a", "--output", "b", "c"]),
            Err(UsageError::WrongArgumentCount(5))
        );
    }

    #[test]
    fn test_parse_swapped_flags() {
        let result = parse(&["copyfile", "--output", "b.txt", "--input", "a.txt"]);
        assert_eq!(
            result,
            Err(UsageError::UnexpectedFlag {
                position: 1,
                expected: "--input",
                found: "--output".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_wrong_second_flag() {
        let result = parse(&["copyfile", "--input", "a.txt", "--out", "b.txt"]);
        assert!(matches!(
            result,
            Err(UsageError::UnexpectedFlag { position: 3, .. })
        ));
    }

    #[test]
    fn test_parse_help_is_usage_error() {
        assert!(parse(&["copyfile", "--help"]).is_err());
    }

    #[test]
    fn test_parse_equals_form_rejected() {
        assert_eq!(
            parse(&["copyfile", "--input=a.txt", "--output=b.txt"]),
            Err(UsageError::WrongArgumentCount(2))
        );
    }

    #[test]
    fn test_parse_hyphen_leading_path() {
        let invocation = parse(&["copyfile", "--input", "-a.txt", "--output", "-b.txt"]).unwrap();
        assert_eq!(invocation.input, PathBuf::from("-a.txt"));
        assert_eq!(invocation.output, PathBuf::from("-b.txt"));
    }

    #[test]
    fn test_parse_empty_paths_accepted() {
        let invocation = parse(&["copyfile", "--input", "", "--output", ""]).unwrap();
        assert_eq!(invocation.input, PathBuf::new());
    }

    #[test]
    fn test_parse_path_at_limit_rejected() {
        let long = "a".repeat(MAX_PATH_LEN);
        let result = parse(&["copyfile", "--input", &long, "--output", "b.txt"]);
        assert_eq!(
            result,
            Err(UsageError::PathTooLong {
                flag: "--input",
                len: MAX_PATH_LEN,
                max: MAX_PATH_LEN,
            })
        );
    }

    #[test]
    fn test_parse_path_below_limit_accepted() {
        let long = "a".repeat(MAX_PATH_LEN - 1);
        assert!(parse(&["copyfile", "--input", "a.txt", "--output", &long]).is_ok());
    }

    #[test]
    fn test_parse_custom_limit() {
        let options = CopyOptions {
            max_path_len: 8,
            ..CopyOptions::default()
        };
        let result = CLIArgs::parse_args(
            ["copyfile", "--input", "a.txt", "--output", "long-name.txt"],
            &options,
        );
        assert!(matches!(
            result,
            Err(UsageError::PathTooLong {
                flag: "--output",
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_non_utf8_path() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![b'f', 0xff, b'.', b'b', b'i', b'n']);
        let args = vec![
            OsString::from("copyfile"),
            OsString::from("--input"),
            raw.clone(),
            OsString::from("--output"),
            OsString::from("out.bin"),
        ];
        let invocation = CLIArgs::parse_args(args, &CopyOptions::default()).unwrap();
        assert_eq!(invocation.input, PathBuf::from(raw));
    }

    #[test]
    fn test_usage_mentions_both_flags() {
        let usage = CLIArgs::usage();
        assert!(usage.contains("--input <input_file_path>"));
        assert!(usage.contains("--output <output_file_path>"));
    }
}
