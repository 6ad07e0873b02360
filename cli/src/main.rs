use anyhow::Context;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use hexmines_core::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod draw;
mod load;
mod logger;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for Difficulty {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => Difficulty::Beginner,
            Preset::Intermediate => Difficulty::Intermediate,
            Preset::Expert => Difficulty::Expert,
        }
    }
}

/// Minesweeper on a hexagonal grid.
///
/// Without a board option an interactive menu is shown. Moves are typed as
/// `<row><column><action>` tokens, e.g. `Ab*` opens row A column b and `Cd!`
/// toggles the mark on row C column d. Several tokens may be chained.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Play one round with a preset board
    #[arg(long, value_enum, conflicts_with_all = ["board", "rows"])]
    difficulty: Option<Preset>,

    /// Rows of a custom random board (1-30)
    #[arg(long, requires_all = ["cols", "mines"], conflicts_with = "board")]
    rows: Option<Coord>,

    /// Columns of a custom random board (1-30)
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Mines of a custom random board
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Play one round on a board-definition file
    #[arg(long, value_name = "FILE")]
    board: Option<PathBuf>,

    /// Seed for mine placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON summary after each round
    #[arg(long)]
    summary_json: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Clone, Debug, PartialEq)]
enum Mode {
    Random(BoardConfig),
    File(PathBuf),
}

impl Args {
    fn mode(&self) -> anyhow::Result<Option<Mode>> {
        if let Some(path) = &self.board {
            return Ok(Some(Mode::File(path.clone())));
        }
        if let Some(preset) = self.difficulty {
            return Ok(Some(Mode::Random(Difficulty::from(preset).config())));
        }
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                let config = BoardConfig::new((rows, cols), mines)
                    .context("invalid custom board")?;
                Ok(Some(Mode::Random(config)))
            }
            _ => Ok(None),
        }
    }
}

struct Player<R, W> {
    input: R,
    out: W,
    seed: Option<u64>,
    summary_json: bool,
}

impl<R: BufRead, W: Write> Player<R, W> {
    /// Reads one line after showing `message`, `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        writeln!(self.out)?;
        Ok(Some(line.trim().to_owned()))
    }

    fn new_session(&mut self, mode: &Mode) -> anyhow::Result<Option<GameSession>> {
        match mode {
            Mode::Random(config) => {
                let seed = self.seed.unwrap_or_else(rand::random);
                let generator = RandomMinefieldGenerator::new(seed, *config);
                log::info!("Generating {:?} with seed {}", config, generator.seed());
                Ok(Some(GameSession::from_generator(generator)?))
            }
            Mode::File(path) => match load::load_definition(path) {
                Ok(definition) => Ok(Some(GameSession::from_generator(definition)?)),
                Err(err) => {
                    writeln!(self.out, "{}", err)?;
                    Ok(None)
                }
            },
        }
    }

    /// Plays one round, returning its summary unless input ran out first.
    fn play_round(&mut self, mode: &Mode) -> anyhow::Result<Option<RoundSummary>> {
        let Some(mut session) = self.new_session(mode)? else {
            return Ok(None);
        };

        write!(self.out, "{}", draw::render(&session))?;
        while !session.is_finished() {
            let Some(line) = self.prompt("Cell and action (! mark, * open): ")? else {
                return Ok(None);
            };

            let report = session.submit(&line);
            if let Some(rejected) = &report.rejected {
                writeln!(self.out, "{}: {}\n", rejected.token, rejected.error)?;
            }
            write!(self.out, "{}", draw::render(&session))?;
        }

        let summary = session.summary();
        match summary.state {
            SessionState::Won => writeln!(
                self.out,
                "\nCongratulations, you cleared the board in {} seconds!",
                summary.elapsed_secs
            )?,
            _ => writeln!(self.out, "\nBOOM! You opened a mine. Game over.")?,
        }
        if self.summary_json {
            writeln!(self.out, "{}", serde_json::to_string(&summary)?)?;
        }
        Ok(Some(summary))
    }

    fn menu(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.out, "HEXMINES")?;
            writeln!(self.out, "--------")?;
            writeln!(self.out, " 1. Beginner (9x9, 10 mines)")?;
            writeln!(self.out, " 2. Intermediate (16x16, 40 mines)")?;
            writeln!(self.out, " 3. Expert (16x30, 99 mines)")?;
            writeln!(self.out, " 4. Load from file")?;
            writeln!(self.out, " 5. Quit")?;

            let Some(choice) = self.prompt("\nChoose an option: ")? else {
                return Ok(());
            };
            let mode = match choice.parse::<u8>() {
                Ok(1) => Mode::Random(Difficulty::Beginner.config()),
                Ok(2) => Mode::Random(Difficulty::Intermediate.config()),
                Ok(3) => Mode::Random(Difficulty::Expert.config()),
                Ok(4) => {
                    let Some(name) = self.prompt("File name: ")? else {
                        return Ok(());
                    };
                    Mode::File(PathBuf::from(name))
                }
                Ok(5) => {
                    writeln!(self.out, "See you next time!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.out, "Please choose a valid option.\n")?;
                    continue;
                }
            };

            if self.play_round(&mode)?.is_none() && matches!(mode, Mode::Random(_)) {
                return Ok(());
            }
            writeln!(self.out)?;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter())?;

    let mode = args.mode()?;
    let mut player = Player {
        input: io::stdin().lock(),
        out: io::stdout().lock(),
        seed: args.seed,
        summary_json: args.summary_json,
    };

    match mode {
        Some(mode) => {
            player.play_round(&mode)?;
        }
        None => player.menu()?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(script: &str) -> Player<&[u8], Vec<u8>> {
        Player {
            input: script.as_bytes(),
            out: Vec::new(),
            seed: Some(7),
            summary_json: true,
        }
    }

    fn definition_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("hexmines-cli-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn args_pick_mode() {
        let args = Args::parse_from(["hexmines", "--difficulty", "expert"]);
        assert_eq!(
            args.mode().unwrap(),
            Some(Mode::Random(Difficulty::Expert.config()))
        );

        let args = Args::parse_from(["hexmines", "--rows", "4", "--cols", "5", "--mines", "3"]);
        assert_eq!(
            args.mode().unwrap(),
            Some(Mode::Random(BoardConfig::new_unchecked((4, 5), 3)))
        );

        let args = Args::parse_from(["hexmines"]);
        assert_eq!(args.mode().unwrap(), None);
    }

    #[test]
    fn invalid_custom_board_is_an_error() {
        let args = Args::parse_from(["hexmines", "--rows", "40", "--cols", "5", "--mines", "3"]);

        assert!(args.mode().is_err());
    }

    #[test]
    fn scripted_round_is_won() {
        let path = definition_file("won.txt", "2 4\n*.*.\n...*\n");
        let mut player = player("Aa!Ac!Bd!\nZz*\nAb*Ad*\n");

        let summary = player.play_round(&Mode::File(path.clone())).unwrap().unwrap();

        assert_eq!(summary.state, SessionState::Won);
        let out = String::from_utf8(player.out).unwrap();
        assert!(out.contains("Zz*: Invalid input"));
        assert!(out.contains("Congratulations"));
        assert!(out.contains("\"state\":\"Won\""));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_returns_to_caller() {
        let mut player = player("");

        let summary = player
            .play_round(&Mode::File(PathBuf::from("/nonexistent/hexmines/board.txt")))
            .unwrap();

        assert_eq!(summary, None);
        let out = String::from_utf8(player.out).unwrap();
        assert!(out.contains("No file found"));
    }

    #[test]
    fn menu_quits_on_five() {
        let mut player = player("9\n5\n");

        player.menu().unwrap();

        let out = String::from_utf8(player.out).unwrap();
        assert!(out.contains("Please choose a valid option."));
        assert!(out.contains("See you next time!"));
    }
}
