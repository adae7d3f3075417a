use super::Atom;
use std::collections::BTreeMap;
use std::fmt;

/// Element counts in Hill order: carbon, hydrogen, then the rest
/// alphabetically by symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    counts: BTreeMap<String, usize>,
}

impl Formula {
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = BTreeMap::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if symbol.is_empty() {
                continue;
            }
            *counts.entry(symbol.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn from_atoms(atoms: &[Atom]) -> Self {
        Self::from_symbols(atoms.iter().map(|atom| atom.element.as_str()))
    }

    pub fn count(&self, symbol: &str) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Symbols with their counts, in output order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, usize)> {
        let leading = ["C", "H"]
            .into_iter()
            .filter_map(|symbol| self.counts.get_key_value(symbol));
        let rest = self
            .counts
            .iter()
            .filter(|(symbol, _)| !matches!(symbol.as_str(), "C" | "H"));
        leading
            .chain(rest)
            .map(|(symbol, count)| (symbol.as_str(), *count))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, count) in self.terms() {
            if count == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}{}", symbol, count)?;
            }
        }
        Ok(())
    }
}

pub fn hill_formula<I, S>(symbols: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Formula::from_symbols(symbols).to_string()
}
