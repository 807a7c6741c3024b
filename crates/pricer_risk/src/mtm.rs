//! Mark-to-market of hedging instruments.
//!
//! `MTM = sign(q) · (today − original) · |notional|`, where `sign(q)` is
//! `−1` for short positions.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::CurrencyPair;
use pricer_models::instruments::{Instrument, InstrumentId};
use pricer_pricing::{price_instrument, InstrumentPricer, PriceMethod, PricingError};
use tracing::warn;

/// MTM for an already computed price.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentKind};
/// use pricer_risk::mtm_from_price;
///
/// let call = Instrument::new(
///     "C-1",
///     InstrumentKind::VanillaCall,
///     "EURUSD".parse().unwrap(),
///     1_000_000.0,
///     Date::from_ymd(2025, 6, 30).unwrap(),
/// )
/// .with_strike(1.10)
/// .with_original_price(0.05);
///
/// assert!((mtm_from_price(&call, 0.08) - 30_000.0).abs() < 1e-6);
///
/// let short = call.with_quantity(-1.0);
/// assert!((mtm_from_price(&short, 0.08) + 30_000.0).abs() < 1e-6);
/// ```
#[inline]
pub fn mtm_from_price(instrument: &Instrument, today_price: f64) -> f64 {
    instrument.position_sign() * (today_price - instrument.original_price) * instrument.notional.abs()
}

/// Prices the instrument with the default engine and returns its MTM.
pub fn compute_mtm(instrument: &Instrument, market: &MarketSnapshot) -> f64 {
    mtm_from_price(instrument, price_instrument(instrument, market))
}

/// Price and MTM of one instrument in a valuation pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentValuation {
    /// Instrument identifier
    pub id: InstrumentId,
    /// Underlying pair
    pub pair: CurrencyPair,
    /// Price per unit of notional
    pub today_price: f64,
    /// Mark-to-market in quote currency
    pub mtm: f64,
    /// Pricing method; `None` when pricing failed and the price was zeroed
    pub method: Option<PriceMethod>,
    /// Monte Carlo standard error, when simulated
    pub std_error: Option<f64>,
}

/// Values one instrument, absorbing every pricing failure except
/// cancellation into a zero price with a warning.
pub(crate) fn value_instrument(
    pricer: &InstrumentPricer,
    instrument: &Instrument,
    market: &MarketSnapshot,
    vol_shift: f64,
) -> Result<InstrumentValuation, PricingError> {
    let (today_price, method, std_error) =
        match pricer.try_price_shifted(instrument, market, vol_shift) {
            Ok(outcome) => (outcome.price, Some(outcome.method), outcome.std_error),
            Err(PricingError::Cancelled) => return Err(PricingError::Cancelled),
            Err(err) => {
                warn!(
                    instrument_id = %instrument.id,
                    kind = %instrument.kind,
                    reason = %err,
                    "pricing failed, using zero price"
                );
                (0.0, None, None)
            }
        };
    Ok(InstrumentValuation {
        id: instrument.id.clone(),
        pair: instrument.pair,
        today_price,
        mtm: mtm_from_price(instrument, today_price),
        method,
        std_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pricer_core::types::Date;
    use pricer_models::instruments::InstrumentKind;
    use pricer_pricing::{CancellationToken, EngineConfig};

    fn valuation() -> Date {
        Date::from_ymd(2024, 6, 3).unwrap()
    }

    fn market() -> MarketSnapshot {
        MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, valuation()).unwrap()
    }

    fn call() -> Instrument {
        Instrument::new(
            "C-1",
            InstrumentKind::VanillaCall,
            "EURUSD".parse().unwrap(),
            1_000_000.0,
            Date::from_ymd(2025, 6, 3).unwrap(),
        )
        .with_strike(1.10)
        .with_original_price(0.05)
    }

    // ==========================================================
    // MTM sign convention
    // ==========================================================

    #[test]
    fn test_long_and_short_mtm() {
        assert_abs_diff_eq!(mtm_from_price(&call(), 0.08), 30_000.0, epsilon = 1e-6);
        let short = call().with_quantity(-250.0);
        assert_abs_diff_eq!(mtm_from_price(&short, 0.08), -30_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_expired_instrument_loses_premium() {
        let mut expired = call();
        expired.maturity = valuation();
        assert_abs_diff_eq!(compute_mtm(&expired, &market()), -50_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_compute_mtm_uses_engine_price() {
        let price = price_instrument(&call(), &market());
        assert_abs_diff_eq!(
            compute_mtm(&call(), &market()),
            (price - 0.05) * 1_000_000.0,
            epsilon = 1e-9
        );
    }

    // ==========================================================
    // Valuation pass
    // ==========================================================

    #[test]
    fn test_value_instrument_zeroes_failures() {
        let no_barrier = Instrument::new(
            "KO-1",
            "Knock-Out Put".parse().unwrap(),
            "EURUSD".parse().unwrap(),
            1_000_000.0,
            Date::from_ymd(2025, 6, 3).unwrap(),
        )
        .with_strike(1.05)
        .with_original_price(0.01);
        let valuation =
            value_instrument(&InstrumentPricer::default(), &no_barrier, &market(), 0.0).unwrap();
        assert_eq!(valuation.today_price, 0.0);
        assert_eq!(valuation.method, None);
        assert_abs_diff_eq!(valuation.mtm, -10_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_value_instrument_propagates_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let pricer = InstrumentPricer::new(EngineConfig::default().with_seed(1))
            .with_cancellation(token);
        let touch = Instrument::new(
            "OT-1",
            "One-Touch".parse().unwrap(),
            "EURUSD".parse().unwrap(),
            1_000_000.0,
            Date::from_ymd(2025, 6, 3).unwrap(),
        )
        .with_barrier(1.12);
        assert_eq!(
            value_instrument(&pricer, &touch, &market(), 0.0),
            Err(PricingError::Cancelled)
        );
    }
}
