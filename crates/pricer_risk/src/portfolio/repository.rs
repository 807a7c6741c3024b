//! Instrument storage.
//!
//! The repository is an explicit value handed to whoever needs it; there
//! is no process-wide instance.

use std::collections::BTreeMap;

use pricer_models::instruments::{Instrument, InstrumentId};
use tracing::debug;

use super::error::PortfolioError;

/// Storage for the hedging instruments of one book.
pub trait PortfolioRepository {
    /// Adds a new instrument.
    ///
    /// # Errors
    /// `DuplicateInstrument` if the ID exists, `InvalidInstrument` if the
    /// record fails validation.
    fn add(&mut self, instrument: Instrument) -> Result<(), PortfolioError>;

    /// Returns a copy of the instrument with `id`.
    fn get(&self, id: &InstrumentId) -> Option<Instrument>;

    /// Replaces an existing instrument, returning the previous record.
    fn update(&mut self, instrument: Instrument) -> Result<Instrument, PortfolioError>;

    /// Removes and returns the instrument with `id`.
    fn remove(&mut self, id: &InstrumentId) -> Result<Instrument, PortfolioError>;

    /// All instruments.
    fn list(&self) -> Vec<Instrument>;

    /// Removes every instrument.
    fn clear(&mut self);

    /// Adds instruments in order, stopping at the first failure.
    fn add_all<I>(&mut self, instruments: I) -> Result<usize, PortfolioError>
    where
        I: IntoIterator<Item = Instrument>,
        Self: Sized,
    {
        let mut added = 0;
        for instrument in instruments {
            self.add(instrument)?;
            added += 1;
        }
        Ok(added)
    }
}

/// In-memory repository ordered by instrument ID.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentId, InstrumentKind};
/// use pricer_risk::portfolio::{InMemoryPortfolioRepository, PortfolioRepository};
///
/// let mut repo = InMemoryPortfolioRepository::new();
/// let fwd = Instrument::new(
///     "FWD-1",
///     InstrumentKind::Forward,
///     "EURUSD".parse().unwrap(),
///     1e6,
///     Date::from_ymd(2025, 3, 31).unwrap(),
/// )
/// .with_strike(1.09);
///
/// repo.add(fwd.clone()).unwrap();
/// assert!(repo.add(fwd).is_err());
/// assert_eq!(repo.len(), 1);
/// assert!(repo.remove(&InstrumentId::new("FWD-1")).is_ok());
/// assert!(repo.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolioRepository {
    instruments: BTreeMap<InstrumentId, Instrument>,
}

impl InMemoryPortfolioRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instruments.
    #[inline]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Whether the repository is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Iterates instruments in ID order without cloning.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }
}

fn validated(instrument: Instrument) -> Result<Instrument, PortfolioError> {
    instrument
        .validate()
        .map_err(|source| PortfolioError::InvalidInstrument {
            id: instrument.id.clone(),
            source,
        })?;
    Ok(instrument)
}

impl PortfolioRepository for InMemoryPortfolioRepository {
    fn add(&mut self, instrument: Instrument) -> Result<(), PortfolioError> {
        if self.instruments.contains_key(&instrument.id) {
            return Err(PortfolioError::DuplicateInstrument(instrument.id));
        }
        let instrument = validated(instrument)?;
        debug!(instrument_id = %instrument.id, kind = %instrument.kind, "instrument added");
        self.instruments.insert(instrument.id.clone(), instrument);
        Ok(())
    }

    fn get(&self, id: &InstrumentId) -> Option<Instrument> {
        self.instruments.get(id).cloned()
    }

    fn update(&mut self, instrument: Instrument) -> Result<Instrument, PortfolioError> {
        if !self.instruments.contains_key(&instrument.id) {
            return Err(PortfolioError::InstrumentNotFound(instrument.id));
        }
        let instrument = validated(instrument)?;
        let id = instrument.id.clone();
        self.instruments
            .insert(id.clone(), instrument)
            .ok_or(PortfolioError::InstrumentNotFound(id))
    }

    fn remove(&mut self, id: &InstrumentId) -> Result<Instrument, PortfolioError> {
        self.instruments
            .remove(id)
            .ok_or_else(|| PortfolioError::InstrumentNotFound(id.clone()))
    }

    fn list(&self) -> Vec<Instrument> {
        self.instruments.values().cloned().collect()
    }

    fn clear(&mut self) {
        self.instruments.clear();
    }
}

impl FromIterator<Instrument> for InMemoryPortfolioRepository {
    /// Collects instruments; later duplicates replace earlier ones.
    fn from_iter<I: IntoIterator<Item = Instrument>>(iter: I) -> Self {
        Self {
            instruments: iter
                .into_iter()
                .map(|instrument| (instrument.id.clone(), instrument))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Date;
    use pricer_models::instruments::InstrumentKind;

    fn forward(id: &str, strike: f64) -> Instrument {
        Instrument::new(
            id,
            InstrumentKind::Forward,
            "EURUSD".parse().unwrap(),
            1e6,
            Date::from_ymd(2025, 3, 31).unwrap(),
        )
        .with_strike(strike)
    }

    #[test]
    fn test_crud_cycle() {
        let mut repo = InMemoryPortfolioRepository::new();
        repo.add(forward("B", 1.09)).unwrap();
        repo.add(forward("A", 1.08)).unwrap();

        let ids: Vec<_> = repo.list().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![InstrumentId::new("A"), InstrumentId::new("B")]);

        let previous = repo.update(forward("A", 1.10)).unwrap();
        assert_eq!(previous.strike, Some(1.08));
        assert_eq!(repo.get(&InstrumentId::new("A")).unwrap().strike, Some(1.10));

        repo.clear();
        assert!(repo.is_empty());
    }

    #[test]
    fn test_missing_id_errors() {
        let mut repo = InMemoryPortfolioRepository::new();
        assert!(matches!(
            repo.update(forward("X", 1.0)),
            Err(PortfolioError::InstrumentNotFound(_))
        ));
        assert!(matches!(
            repo.remove(&InstrumentId::new("X")),
            Err(PortfolioError::InstrumentNotFound(_))
        ));
        assert!(repo.get(&InstrumentId::new("X")).is_none());
    }

    #[test]
    fn test_add_rejects_invalid_instrument() {
        let mut repo = InMemoryPortfolioRepository::new();
        let bad = forward("BAD", 1.0).with_rebate(2.0);
        assert!(matches!(
            repo.add(bad),
            Err(PortfolioError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn test_add_all_stops_at_duplicate() {
        let mut repo = InMemoryPortfolioRepository::new();
        let result = repo.add_all(vec![forward("A", 1.0), forward("A", 1.1), forward("C", 1.2)]);
        assert!(matches!(result, Err(PortfolioError::DuplicateInstrument(_))));
        assert_eq!(repo.len(), 1);
    }
}
