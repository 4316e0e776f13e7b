//! Line-oriented command shell.
//!
//! Each command is one whitespace-separated line. A [`Session`] owns the
//! network and turns every line into zero or more output lines, so the
//! interactive loop, batch scripts and tests all drive the same code.

mod repl;
mod script;
mod session;

pub use repl::run_repl;
pub use script::{ScriptError, read_script};
pub use session::Session;

/// Error from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A known command was given the wrong number of arguments
    #[error("{}", rejection(.command, .args))]
    WrongArity { command: String, args: Vec<String> },
}

/// A parsed command. Arguments stay as raw tokens: validation happens when
/// the command runs, and rejections echo the tokens exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `t <name> <district>`
    AddTerminal { name: String, district: String },

    /// `b <num> <source> <destination> <travel> <fare>`
    AddRoute {
        num: String,
        source: String,
        destination: String,
        travel_time: String,
        fare: String,
    },

    /// `l <num> <HHMM>`
    AddDeparture { route: String, time: String },

    /// `T <terminal>`
    TerminalInfo { name: String },

    /// `B <num>`
    RouteInfo { num: String },

    /// `D`
    Districts,

    /// `C <source> <destination>`
    FindRoutes { source: String, destination: String },

    /// `F <source> <destination> <HHMM>`
    Plan {
        source: String,
        destination: String,
        time: String,
    },

    /// `r`
    Clear,

    /// `run <file>`
    Run { path: String },

    /// `help`
    Help,

    /// `exit`
    Exit,
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let arity = |n: usize| -> Result<Vec<String>, CommandError> {
            if args.len() == n {
                Ok(args.clone())
            } else {
                Err(CommandError::WrongArity {
                    command: word.to_string(),
                    args: args.clone(),
                })
            }
        };

        let command = match word {
            "t" => {
                let [name, district] = take(arity(2)?);
                Command::AddTerminal { name, district }
            }
            "b" => {
                let [num, source, destination, travel_time, fare] = take(arity(5)?);
                Command::AddRoute {
                    num,
                    source,
                    destination,
                    travel_time,
                    fare,
                }
            }
            "l" => {
                let [route, time] = take(arity(2)?);
                Command::AddDeparture { route, time }
            }
            "T" => {
                let [name] = take(arity(1)?);
                Command::TerminalInfo { name }
            }
            "B" => {
                let [num] = take(arity(1)?);
                Command::RouteInfo { num }
            }
            "D" => {
                arity(0)?;
                Command::Districts
            }
            "C" => {
                let [source, destination] = take(arity(2)?);
                Command::FindRoutes {
                    source,
                    destination,
                }
            }
            "F" => {
                let [source, destination, time] = take(arity(3)?);
                Command::Plan {
                    source,
                    destination,
                    time,
                }
            }
            "r" => {
                arity(0)?;
                Command::Clear
            }
            "run" => {
                let [path] = take(arity(1)?);
                Command::Run { path }
            }
            "help" => Command::Help,
            "exit" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Move exactly `N` tokens out of a vector already checked to hold `N`.
fn take<const N: usize>(args: Vec<String>) -> [String; N] {
    let mut iter = args.into_iter();
    std::array::from_fn(|_| iter.next().unwrap_or_default())
}

/// The standard rejection line: the command and its raw tokens, comma
/// separated, followed by `Invalid Input`.
pub fn rejection(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        format!("{command} Invalid Input")
    } else {
        format!("{command}, {} Invalid Input", args.join(", "))
    }
}

/// One line per command, for `help`.
pub const HELP: &[&str] = &[
    "t <name> <district>                              add a terminal",
    "b <num> <source> <destination> <travel> <fare>   add a route",
    "l <num> <HHMM>                                   add a departure",
    "T <terminal>                                     terminal information",
    "B <num>                                          route information",
    "D                                                district summary",
    "C <source> <destination>                         direct and one-transfer routes",
    "F <source> <destination> <HHMM>                  itineraries leaving within the hour",
    "r                                                clear all data",
    "run <file>                                       run a comma-separated command file",
    "help                                             list commands",
    "exit                                             leave the shell",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_lines_ignored() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn parses_each_command() {
        assert_eq!(
            parse("t A District1"),
            Command::AddTerminal {
                name: "A".into(),
                district: "District1".into()
            }
        );
        assert_eq!(
            parse("b 1 A B 30 2.50"),
            Command::AddRoute {
                num: "1".into(),
                source: "A".into(),
                destination: "B".into(),
                travel_time: "30".into(),
                fare: "2.50".into(),
            }
        );
        assert_eq!(
            parse("  l   1 0800 "),
            Command::AddDeparture {
                route: "1".into(),
                time: "0800".into()
            }
        );
        assert_eq!(parse("T A"), Command::TerminalInfo { name: "A".into() });
        assert_eq!(parse("B 1"), Command::RouteInfo { num: "1".into() });
        assert_eq!(parse("D"), Command::Districts);
        assert_eq!(
            parse("C A B"),
            Command::FindRoutes {
                source: "A".into(),
                destination: "B".into()
            }
        );
        assert_eq!(
            parse("F A B 0800"),
            Command::Plan {
                source: "A".into(),
                destination: "B".into(),
                time: "0800".into()
            }
        );
        assert_eq!(parse("r"), Command::Clear);
        assert_eq!(parse("run cmds.csv"), Command::Run { path: "cmds.csv".into() });
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("exit"), Command::Exit);
    }

    #[test]
    fn commands_are_case_sensitive() {
        assert_eq!(parse("t A D"), Command::AddTerminal { name: "A".into(), district: "D".into() });
        assert_eq!(parse("T A"), Command::TerminalInfo { name: "A".into() });
        assert_eq!(
            Command::parse("x").unwrap_err(),
            CommandError::Unknown("x".into())
        );
    }

    #[test]
    fn wrong_arity_echoes_tokens() {
        let err = Command::parse("l 1").unwrap_err();
        assert_eq!(err.to_string(), "l, 1 Invalid Input");

        let err = Command::parse("F A B 0800 extra").unwrap_err();
        assert_eq!(err.to_string(), "F, A, B, 0800, extra Invalid Input");

        let err = Command::parse("T").unwrap_err();
        assert_eq!(err.to_string(), "T Invalid Input");
    }

    #[test]
    fn unknown_command_message() {
        let err = Command::parse("frobnicate 1 2").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: frobnicate");
    }

    #[test]
    fn help_covers_every_command() {
        for word in ["t ", "b ", "l ", "T ", "B ", "D ", "C ", "F ", "r ", "run ", "help ", "exit "] {
            assert!(
                HELP.iter().any(|line| line.starts_with(word)),
                "no help for {word}"
            );
        }
    }
}
