//! Interactive command parsing

use crate::ranking::MoveInstruction;
use anyhow::{anyhow, bail, Context, Result};

pub const HELP: &str = "\
Commands:
  search <rank> <query>       find songs for a rank
  pick <n>                    add result n (1-based) at the searched rank
  remove <rank>               remove a song, later songs move up
  move <from> <to> [above|below]
                              move a song next to another (default: above)
  list                        show the ranked list
  save                        persist the list
  reload                      discard changes and load the saved list
  clear                       empty the list
  help                        show this text
  quit                        leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { rank: u32, query: String },
    Pick { index: usize },
    Remove { rank: u32 },
    Move(MoveInstruction),
    List,
    Save,
    Reload,
    Clear,
    Help,
    Quit,
}

impl Command {
    /// Parse a line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_lowercase().as_str() {
            "search" | "s" => {
                let rank = parse_rank(words.next(), "search")?;
                let query = words.collect::<Vec<_>>().join(" ");
                if query.is_empty() {
                    bail!("usage: search <rank> <query>");
                }
                Command::Search { rank, query }
            }
            "pick" | "p" => {
                let n: usize = words
                    .next()
                    .ok_or_else(|| anyhow!("usage: pick <n>"))?
                    .parse()
                    .context("result number must be a positive integer")?;
                if n == 0 {
                    bail!("results are numbered from 1");
                }
                Command::Pick { index: n - 1 }
            }
            "remove" | "rm" => Command::Remove {
                rank: parse_rank(words.next(), "remove")?,
            },
            "move" | "mv" => {
                let from = parse_rank(words.next(), "move")?;
                let to = parse_rank(words.next(), "move")?;
                let insert_before = match words.next() {
                    None | Some("above") => true,
                    Some("below") => false,
                    Some(other) => bail!("expected 'above' or 'below', got '{}'", other),
                };
                Command::Move(MoveInstruction::new(from, to, insert_before))
            }
            "list" | "ls" => Command::List,
            "save" => Command::Save,
            "reload" => Command::Reload,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{}' (try 'help')", other),
        };

        Ok(Some(command))
    }
}

fn parse_rank(word: Option<&str>, verb: &str) -> Result<u32> {
    let word = word.ok_or_else(|| anyhow!("'{}' needs a rank", verb))?;
    let rank: u32 = word
        .parse()
        .with_context(|| format!("'{}' is not a rank", word))?;
    if rank == 0 {
        bail!("ranks start at 1");
    }
    Ok(rank)
}
