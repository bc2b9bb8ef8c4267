use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const SCREEN: &str = "screen";
const REPORT_EXTENSION: &str = ".txt";

/// Where a rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    Screen,
    /// Text file, appended to. Always carries a `.txt` extension.
    File(PathBuf),
}

impl Destination {
    pub fn file(name: &str) -> Self {
        if name.ends_with(REPORT_EXTENSION) {
            Destination::File(PathBuf::from(name))
        } else {
            Destination::File(PathBuf::from(format!("{name}{REPORT_EXTENSION}")))
        }
    }
}

impl From<&str> for Destination {
    fn from(s: &str) -> Self {
        match s.trim() {
            SCREEN => Destination::Screen,
            name => Destination::file(name),
        }
    }
}

impl FromStr for Destination {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Destination::from(s))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Screen => f.write_str(SCREEN),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Ordered, duplicate-free set of report destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destinations {
    entries: Vec<Destination>,
}

impl Destinations {
    pub fn new<I, D>(destinations: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Destination>,
    {
        let mut set = Destinations::default();
        for destination in destinations {
            set.add(destination);
        }
        set
    }

    /// Returns `false` if the destination was already present.
    pub fn add(&mut self, destination: impl Into<Destination>) -> bool {
        let destination = destination.into();
        if self.entries.contains(&destination) {
            return false;
        }
        self.entries.push(destination);
        true
    }

    /// Returns `false` if the destination was not present.
    pub fn remove(&mut self, destination: impl Into<Destination>) -> bool {
        let destination = destination.into();
        let before = self.entries.len();
        self.entries.retain(|d| *d != destination);
        self.entries.len() != before
    }

    pub fn contains(&self, destination: impl Into<Destination>) -> bool {
        self.entries.contains(&destination.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        write!(f, "AnalysisReport configured to output to: {}", names.join(", "))
    }
}
