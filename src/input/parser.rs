/// A line typed at the mapper prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `set <name> <value...>`: feed a game variable
    Signal { name: String, value: String },
    /// `goto <target>`
    Goto(String),
    /// `find me`
    FindMe,
    /// `where`
    Where,
    /// `dump`: session snapshot as JSON
    Dump,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Usage(&'static str),
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => f.write_str("empty input"),
            ParseError::Usage(u) => write!(f, "usage: {u}"),
            ParseError::Unknown(cmd) => write!(f, "unknown command: {cmd} (try 'help')"),
        }
    }
}

pub const HELP: &str = "\
set <variable> <value>   feed a game variable (roomname, roomdesc, exit_n.., zoneid, zonename, roomid, prompt)
goto <room|keyword>      walk to a room number or note keyword
find me                  re-resolve the current room
where                    show the current room and route
dump                     show the session state as JSON
quit";

pub fn parse_request(input: &str) -> Result<Request, ParseError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let (verb, rest) = match s.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (s, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((n, v)) => (n, v.trim()),
                None => (rest, ""),
            };
            if name.is_empty() {
                return Err(ParseError::Usage("set <variable> <value>"));
            }
            Ok(Request::Signal { name: name.to_string(), value: value.to_string() })
        }
        "goto" => {
            if rest.is_empty() {
                return Err(ParseError::Usage("goto <room|keyword>"));
            }
            Ok(Request::Goto(rest.to_string()))
        }
        "find" if rest.eq_ignore_ascii_case("me") => Ok(Request::FindMe),
        "findme" => Ok(Request::FindMe),
        "where" => Ok(Request::Where),
        "dump" => Ok(Request::Dump),
        "help" | "?" => Ok(Request::Help),
        "quit" | "exit" => Ok(Request::Quit),
        _ => Err(ParseError::Unknown(verb.to_string())),
    }
}
