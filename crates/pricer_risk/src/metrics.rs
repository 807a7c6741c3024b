//! Portfolio risk aggregation.
//!
//! A valuation pass prices every instrument against the snapshot of its
//! pair, sums MTM, and derives parametric VaR from the net position per
//! currency. Instruments whose pair has no snapshot are excluded from every
//! sum and reported by ID.

use std::collections::BTreeMap;

use pricer_core::market_data::MarketSet;
use pricer_core::types::Currency;
use pricer_models::instruments::{Instrument, InstrumentId};
use pricer_pricing::{InstrumentPricer, PricingError};
use tracing::{debug, info, warn};

use crate::config::RiskConfig;
use crate::error::RiskError;
use crate::exposure::{
    currency_exposures, currency_volatility, exposures_from_instruments, hedge_ratio_pct,
    CurrencyExposure, Exposure,
};
use crate::mtm::{value_instrument, InstrumentValuation};
use crate::parallel::{try_parallel_map, DEFAULT_PARALLEL_THRESHOLD};
use crate::var::{parametric_var, CorrelationTable};

/// Portfolio-level risk figures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskMetrics {
    /// One-day VaR at 95%
    pub var95: f64,
    /// One-day VaR at 99%
    pub var99: f64,
    /// Expected shortfall at 95%
    pub expected_shortfall95: f64,
    /// Expected shortfall at 99%
    pub expected_shortfall99: f64,
    /// Sum of exposure magnitudes
    pub total_exposure: f64,
    /// Sum of hedged magnitudes
    pub hedged_exposure: f64,
    /// `total_exposure − hedged_exposure`
    pub unhedged_risk: f64,
    /// Hedged share of total exposure, in percent
    pub hedge_ratio: f64,
    /// Sum of instrument MTM
    pub mtm_impact: f64,
}

/// Full result of a portfolio valuation pass.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskReport {
    /// Aggregate figures
    pub metrics: RiskMetrics,
    /// Per-instrument prices and MTM, in input order
    pub valuations: Vec<InstrumentValuation>,
    /// Exposures per currency
    pub currency_exposures: Vec<CurrencyExposure>,
    /// Instruments left out for lack of market data
    pub excluded: Vec<InstrumentId>,
}

/// Values portfolios and aggregates their risk.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSet;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentKind};
/// use pricer_risk::RiskAggregator;
///
/// let today = Date::from_ymd(2024, 6, 3).unwrap();
/// let markets = MarketSet::reference(today);
/// let forward = Instrument::new(
///     "FWD-1",
///     InstrumentKind::Forward,
///     "EURUSD".parse().unwrap(),
///     1_000_000.0,
///     Date::from_ymd(2025, 6, 3).unwrap(),
/// )
/// .with_strike(1.09);
///
/// let report = RiskAggregator::default()
///     .aggregate(&[forward], &markets, None)
///     .unwrap();
/// assert_eq!(report.valuations.len(), 1);
/// assert!(report.excluded.is_empty());
/// assert!(report.metrics.var95 > 0.0);
/// assert!((report.metrics.hedge_ratio - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct RiskAggregator {
    pricer: InstrumentPricer,
    config: RiskConfig,
    correlations: CorrelationTable,
    parallel_threshold: usize,
}

impl Default for RiskAggregator {
    fn default() -> Self {
        Self::new(InstrumentPricer::default(), RiskConfig::default())
    }
}

impl RiskAggregator {
    /// Creates an aggregator with the standard correlation table.
    pub fn new(pricer: InstrumentPricer, config: RiskConfig) -> Self {
        let correlations = CorrelationTable::standard(config.default_correlation);
        Self {
            pricer,
            config,
            correlations,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Replaces the correlation table.
    pub fn with_correlations(mut self, correlations: CorrelationTable) -> Self {
        self.correlations = correlations;
        self
    }

    /// Sets the portfolio size above which instruments are valued in
    /// parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Pricer used for valuation.
    #[inline]
    pub fn pricer(&self) -> &InstrumentPricer {
        &self.pricer
    }

    /// Risk parameters.
    #[inline]
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Correlation table.
    #[inline]
    pub fn correlations(&self) -> &CorrelationTable {
        &self.correlations
    }

    /// Prices every instrument with market data.
    ///
    /// Returns the valuations in input order and the IDs of instruments
    /// without a snapshot for their pair.
    ///
    /// # Errors
    /// `Cancelled` if the pricer's token fires during the pass.
    pub fn value_portfolio(
        &self,
        instruments: &[Instrument],
        markets: &MarketSet,
    ) -> Result<(Vec<InstrumentValuation>, Vec<InstrumentId>), RiskError> {
        self.value_portfolio_shifted(instruments, markets, |_| 0.0)
    }

    /// As [`value_portfolio`](Self::value_portfolio), adding
    /// `vol_shift(instrument)` to every effective volatility.
    pub(crate) fn value_portfolio_shifted<S>(
        &self,
        instruments: &[Instrument],
        markets: &MarketSet,
        vol_shift: S,
    ) -> Result<(Vec<InstrumentValuation>, Vec<InstrumentId>), RiskError>
    where
        S: Fn(&Instrument) -> f64 + Sync + Send,
    {
        let valued = self.valuation_pass(instruments, markets, vol_shift)?;
        Ok(split_valued(instruments, valued))
    }

    /// One slot per instrument, in input order; `None` where the pair has
    /// no snapshot.
    fn valuation_pass<S>(
        &self,
        instruments: &[Instrument],
        markets: &MarketSet,
        vol_shift: S,
    ) -> Result<Vec<Option<InstrumentValuation>>, RiskError>
    where
        S: Fn(&Instrument) -> f64 + Sync + Send,
    {
        try_parallel_map(instruments, self.parallel_threshold, |instrument| {
            let Some(market) = markets.get(&instrument.pair) else {
                warn!(
                    instrument_id = %instrument.id,
                    pair = %instrument.pair,
                    "no market data, excluded from aggregation"
                );
                return Ok(None);
            };
            value_instrument(&self.pricer, instrument, market, vol_shift(instrument)).map(Some)
        })
        .map_err(|err| match err {
            PricingError::Cancelled => RiskError::Cancelled,
            other => RiskError::Pricing(other),
        })
    }

    /// Values the portfolio and aggregates MTM, exposure and VaR.
    ///
    /// When `exposures` is `None`, each valued instrument stands in for an
    /// exposure in its pair's base currency.
    ///
    /// # Errors
    /// `Cancelled` if the pricer's token fires during the pass.
    pub fn aggregate(
        &self,
        instruments: &[Instrument],
        markets: &MarketSet,
        exposures: Option<&[Exposure]>,
    ) -> Result<RiskReport, RiskError> {
        let valued = self.valuation_pass(instruments, markets, |_| 0.0)?;

        let derived;
        let exposures = match exposures {
            Some(exposures) => exposures,
            None => {
                let priced = instruments
                    .iter()
                    .zip(&valued)
                    .filter(|(_, valuation)| valuation.is_some())
                    .map(|(instrument, _)| instrument);
                derived = exposures_from_instruments(priced);
                derived.as_slice()
            }
        };
        let (valuations, excluded) = split_valued(instruments, valued);

        let by_currency = currency_exposures(exposures, markets, &self.config);
        let metrics = self.metrics_from(&valuations, &by_currency, markets);

        info!(
            instruments = valuations.len(),
            excluded = excluded.len(),
            mtm = metrics.mtm_impact,
            var95 = metrics.var95,
            "portfolio aggregated"
        );

        Ok(RiskReport {
            metrics,
            valuations,
            currency_exposures: by_currency,
            excluded,
        })
    }

    fn metrics_from(
        &self,
        valuations: &[InstrumentValuation],
        by_currency: &[CurrencyExposure],
        markets: &MarketSet,
    ) -> RiskMetrics {
        let mtm_impact: f64 = valuations.iter().map(|v| v.mtm).sum();
        let total_exposure: f64 = by_currency.iter().map(|c| c.gross).sum();
        let hedged_exposure: f64 = by_currency.iter().map(|c| c.hedged).sum();

        let positions: Vec<(Currency, f64)> = by_currency.iter().map(|c| (c.currency, c.net)).collect();
        let volatilities: BTreeMap<Currency, f64> = positions
            .iter()
            .map(|&(currency, _)| (currency, currency_volatility(markets, currency, &self.config)))
            .collect();
        let var = parametric_var(
            &positions,
            |currency| {
                volatilities
                    .get(&currency)
                    .copied()
                    .unwrap_or(self.config.default_volatility)
            },
            &self.correlations,
            &self.config,
        );
        debug!(currencies = positions.len(), var99 = var.var99, "parametric VaR");

        RiskMetrics {
            var95: var.var95,
            var99: var.var99,
            expected_shortfall95: var.expected_shortfall95,
            expected_shortfall99: var.expected_shortfall99,
            total_exposure,
            hedged_exposure,
            unhedged_risk: total_exposure - hedged_exposure,
            hedge_ratio: hedge_ratio_pct(hedged_exposure, total_exposure),
            mtm_impact,
        }
    }
}

/// Aggregates risk with the default engine and risk parameters.
///
/// # Errors
/// Only cancellation aborts the pass, and the default pricer carries no
/// token, so this returns `Ok` in practice.
pub fn aggregate_risk(
    instruments: &[Instrument],
    markets: &MarketSet,
) -> Result<RiskMetrics, RiskError> {
    RiskAggregator::default()
        .aggregate(instruments, markets, None)
        .map(|report| report.metrics)
}

fn split_valued(
    instruments: &[Instrument],
    valued: Vec<Option<InstrumentValuation>>,
) -> (Vec<InstrumentValuation>, Vec<InstrumentId>) {
    let mut valuations = Vec::with_capacity(valued.len());
    let mut excluded = Vec::new();
    for (instrument, valuation) in instruments.iter().zip(valued) {
        match valuation {
            Some(valuation) => valuations.push(valuation),
            None => excluded.push(instrument.id.clone()),
        }
    }
    (valuations, excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::MarketSnapshot;
    use pricer_core::types::Date;
    use pricer_models::instruments::{DigitalKind, InstrumentKind};
    use pricer_pricing::{CancellationToken, EngineConfig};

    use crate::exposure::ExposureDirection;

    fn today() -> Date {
        Date::from_ymd(2024, 6, 3).unwrap()
    }

    fn maturity() -> Date {
        Date::from_ymd(2025, 6, 3).unwrap()
    }

    fn forward(id: &str, pair: &str, notional: f64, strike: f64) -> Instrument {
        Instrument::new(id, InstrumentKind::Forward, pair.parse().unwrap(), notional, maturity())
            .with_strike(strike)
    }

    #[test]
    fn test_missing_market_is_excluded() {
        let mut markets = MarketSet::new();
        markets.insert(
            "EURUSD".parse().unwrap(),
            MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, today()).unwrap(),
        );
        let book = [
            forward("F1", "EURUSD", 1e6, 1.08),
            forward("F2", "AUDNZD", 1e6, 1.08),
        ];

        let report = RiskAggregator::default().aggregate(&book, &markets, None).unwrap();
        assert_eq!(report.valuations.len(), 1);
        assert_eq!(report.excluded, vec![InstrumentId::new("F2")]);
        assert_eq!(report.metrics.total_exposure, 1e6);
        assert_relative_eq!(report.metrics.mtm_impact, report.valuations[0].mtm);
    }

    #[test]
    fn test_excluded_id_does_not_hide_priced_namesake() {
        let mut markets = MarketSet::new();
        markets.insert(
            "EURUSD".parse().unwrap(),
            MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, today()).unwrap(),
        );
        let book = [
            forward("DUP", "EURUSD", 1e6, 1.08),
            forward("DUP", "AUDNZD", 3e6, 1.08),
        ];

        let report = RiskAggregator::default().aggregate(&book, &markets, None).unwrap();
        assert_eq!(report.valuations.len(), 1);
        assert_eq!(report.excluded, vec![InstrumentId::new("DUP")]);
        assert_eq!(report.metrics.total_exposure, 1e6);
        assert_eq!(report.metrics.hedged_exposure, 1e6);
    }

    #[test]
    fn test_single_currency_var_matches_closed_form() {
        let markets = MarketSet::reference(today());
        let book = [forward("F1", "EURUSD", 2e6, 1.08)];
        let metrics = aggregate_risk(&book, &markets).unwrap();

        let expected = 1.645 * 2e6 * 0.0875 * (1.0_f64 / 252.0).sqrt();
        assert_relative_eq!(metrics.var95, expected, max_relative = 1e-12);
        assert_relative_eq!(metrics.expected_shortfall95, expected * 1.28, max_relative = 1e-12);
        assert_relative_eq!(
            metrics.var99,
            2.326 * 2e6 * 0.0875 * (1.0_f64 / 252.0).sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_explicit_exposures_drive_hedge_ratio() {
        let markets = MarketSet::reference(today());
        let book = [forward("F1", "EURUSD", 1e6, 1.08)];
        let exposures = [
            Exposure::new("E1", Currency::EUR, 4e6, ExposureDirection::Receivable)
                .with_hedged_amount(1e6),
        ];
        let report = RiskAggregator::default()
            .aggregate(&book, &markets, Some(&exposures))
            .unwrap();
        assert_eq!(report.metrics.total_exposure, 4e6);
        assert_eq!(report.metrics.unhedged_risk, 3e6);
        assert_relative_eq!(report.metrics.hedge_ratio, 25.0);
    }

    #[test]
    fn test_offsetting_positions_reduce_var() {
        let markets = MarketSet::reference(today());
        let long = forward("L", "EURUSD", 1e6, 1.08);
        let short = forward("S", "EURUSD", 1e6, 1.08).with_quantity(-1.0);

        let metrics = aggregate_risk(&[long, short], &markets).unwrap();
        assert_eq!(metrics.var95, 0.0);
        assert_relative_eq!(metrics.mtm_impact, 0.0, epsilon = 1e-9);
        assert_eq!(metrics.total_exposure, 2e6);
    }

    #[test]
    fn test_parallel_and_sequential_passes_agree() {
        let markets = MarketSet::reference(today());
        let book: Vec<Instrument> = (0..40)
            .map(|i| forward(&format!("F{i}"), "GBPUSD", 1e5 * (i + 1) as f64, 1.25))
            .collect();

        let sequential = RiskAggregator::default()
            .with_parallel_threshold(usize::MAX)
            .aggregate(&book, &markets, None)
            .unwrap();
        let parallel = RiskAggregator::default()
            .with_parallel_threshold(1)
            .aggregate(&book, &markets, None)
            .unwrap();
        assert_eq!(sequential.valuations, parallel.valuations);
        assert_relative_eq!(
            sequential.metrics.var95,
            parallel.metrics.var95,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_cancelled_pass() {
        let token = CancellationToken::new();
        token.cancel();
        let pricer = InstrumentPricer::new(EngineConfig::default()).with_cancellation(token);
        let aggregator = RiskAggregator::new(pricer, RiskConfig::default());

        let one_touch = Instrument::new(
            "OT",
            InstrumentKind::Digital {
                subtype: DigitalKind::OneTouch,
            },
            "EURUSD".parse().unwrap(),
            1e6,
            maturity(),
        )
        .with_barrier(1.12);
        let result = aggregator.aggregate(&[one_touch], &MarketSet::reference(today()), None);
        assert!(matches!(result, Err(RiskError::Cancelled)));
    }

    #[test]
    fn test_empty_book() {
        let metrics = aggregate_risk(&[], &MarketSet::reference(today())).unwrap();
        assert_eq!(metrics, RiskMetrics::default());
    }
}
