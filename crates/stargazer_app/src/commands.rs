use stargazer_core::Msg;

pub const HELP: &str = "\
commands:
  n, next          next page
  p, prev          previous page
  page <n>         jump to page n
  m, mode          toggle between all repositories and starred only
  lang [<tag>]     filter by language (no tag clears the filter)
  s, star <id>     star or unstar a visible repository
  h, help          show this help
  q, quit          exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let verb = verb.to_ascii_lowercase();
    if verb == "lang" {
        // Language names may contain spaces ("Jupyter Notebook").
        let language = line.trim_start()["lang".len()..].trim();
        return Ok(Some(Command::Dispatch(Msg::LanguageFilterChanged(
            language.to_string(),
        ))));
    }
    let rest: Vec<&str> = parts.collect();

    let command = match (verb.as_str(), rest.as_slice()) {
        ("n" | "next", []) => Command::Dispatch(Msg::NextPage),
        ("p" | "prev", []) => Command::Dispatch(Msg::PrevPage),
        ("page", [value]) => {
            let page = value
                .parse::<i64>()
                .map_err(|_| format!("not a page number: {value}"))?;
            Command::Dispatch(Msg::PageRequested(page))
        }
        ("m" | "mode", []) => Command::Dispatch(Msg::ModeToggled),
        ("s" | "star", [value]) => {
            let id = value
                .parse::<u64>()
                .map_err(|_| format!("not a repository id: {value}"))?;
            Command::Dispatch(Msg::StarToggled(id))
        }
        ("h" | "help" | "?", []) => Command::Help,
        ("q" | "quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };
    Ok(Some(command))
}
