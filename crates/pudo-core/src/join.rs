//! Nearest-neighbor join engine.
//!
//! For every vendor, in input order:
//!
//! 1. query the [`SpatialIndex`] for the planar-nearest PUDO,
//! 2. compute the haversine distance to that PUDO,
//! 3. keep the pair when the distance is within the threshold (inclusive).
//!
//! Vendors whose nearest PUDO is too far away produce no output.

use pudo_model::{Coordinate, JoinOptions, JoinedRecord, SourceRecord, TargetRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace};

use crate::distance::haversine_km;
use crate::error::{JoinError, Result};
use crate::index::SpatialIndex;
use crate::text::normalize_optional;

/// Receives progress notifications while a join runs.
///
/// Observers only watch; they cannot change ordering or results.
pub trait JoinObserver {
    /// Called once before the first vendor is processed.
    fn on_start(&mut self, _total: usize) {}

    /// Called after each vendor. `processed` counts from 1.
    fn on_record(&mut self, _processed: usize, _matched: bool) {}

    /// Called once after the last vendor.
    fn on_finish(&mut self, _stats: &JoinStats) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl JoinObserver for NoopObserver {}

/// Counters for one join run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    pub processed: usize,
    pub matched: usize,
    /// Vendors whose nearest PUDO was beyond the threshold.
    pub discarded: usize,
}

/// Records produced by a run together with its counters.
#[derive(Debug, Clone, Default)]
pub struct JoinOutput {
    pub records: Vec<JoinedRecord>,
    pub stats: JoinStats,
}

/// The PUDO selected for a point and its exact distance.
#[derive(Debug, Clone, Copy)]
pub struct NearestTarget<'a> {
    /// Position of the PUDO in the target slice.
    pub position: usize,
    pub target: &'a TargetRecord,
    pub distance_km: f64,
}

/// Join engine holding the spatial index over one fixed PUDO set.
#[derive(Debug)]
pub struct JoinEngine<'a> {
    targets: &'a [TargetRecord],
    index: SpatialIndex,
    threshold_km: f64,
}

impl<'a> JoinEngine<'a> {
    /// Validate `options` and build the index over `targets`.
    ///
    /// # Errors
    ///
    /// - [`JoinError::InvalidThreshold`] for a NaN or infinite threshold.
    /// - [`JoinError::EmptyTargetSet`] when `targets` is empty.
    pub fn new(targets: &'a [TargetRecord], options: &JoinOptions) -> Result<Self> {
        let threshold_km = options.threshold_km;
        if !threshold_km.is_finite() {
            return Err(JoinError::InvalidThreshold {
                value: threshold_km,
            });
        }

        let coordinates: Vec<Coordinate> = targets.iter().map(|target| target.location).collect();
        let index = SpatialIndex::build(&coordinates)?;
        debug!(
            target_count = index.len(),
            distinct_points = index.distinct_points(),
            threshold_km,
            "spatial index built"
        );

        Ok(Self {
            targets,
            index,
            threshold_km,
        })
    }

    /// Planar-nearest PUDO for `point`, with its haversine distance.
    pub fn nearest(&self, point: Coordinate) -> NearestTarget<'a> {
        let position = self.index.query(point);
        let target = &self.targets[position];
        NearestTarget {
            position,
            target,
            distance_km: haversine_km(point, target.location),
        }
    }

    /// Pair one vendor with its nearest PUDO, or `None` when it is too far.
    pub fn join_record(&self, source: &SourceRecord) -> Option<JoinedRecord> {
        let nearest = self.nearest(source.location);
        if nearest.distance_km > self.threshold_km {
            trace!(
                kyc_id = %source.kyc_id,
                point = %source.location,
                distance_km = nearest.distance_km,
                "nearest pudo beyond threshold"
            );
            return None;
        }
        Some(assemble(source, nearest.target, nearest.distance_km))
    }

    /// Join every vendor in `sources`, preserving input order.
    pub fn run<O>(&self, sources: &[SourceRecord], observer: &mut O) -> JoinOutput
    where
        O: JoinObserver + ?Sized,
    {
        let span = info_span!(
            "join",
            source_count = sources.len(),
            target_count = self.targets.len()
        );
        let _guard = span.enter();

        observer.on_start(sources.len());
        let mut records = Vec::new();
        let mut stats = JoinStats::default();
        for source in sources {
            let joined = self.join_record(source);
            let matched = joined.is_some();
            stats.processed += 1;
            if let Some(record) = joined {
                stats.matched += 1;
                records.push(record);
            } else {
                stats.discarded += 1;
            }
            observer.on_record(stats.processed, matched);
        }
        observer.on_finish(&stats);

        debug!(
            processed = stats.processed,
            matched = stats.matched,
            discarded = stats.discarded,
            "join complete"
        );
        JoinOutput { records, stats }
    }
}

fn assemble(source: &SourceRecord, target: &TargetRecord, distance_km: f64) -> JoinedRecord {
    JoinedRecord {
        distance_km,
        kyc_id: source.kyc_id.clone(),
        kyc_status: source.kyc_status.clone(),
        address: source.address.clone(),
        city: normalize_optional(source.city.as_deref()),
        state: normalize_optional(source.state.as_deref()),
        cnpj: source.cnpj.clone(),
        point: source.location,
        ado_4w: target.ado_4w,
        green: target.location,
        region: target.region.clone(),
        region_id: target.region_id.clone(),
        gf_lower: target.gf_lower,
    }
}

/// Join `sources` against `targets`, returning the pairs within the threshold.
///
/// # Errors
///
/// See [`JoinEngine::new`]. No records are returned when the run fails.
pub fn join(
    sources: &[SourceRecord],
    targets: &[TargetRecord],
    options: &JoinOptions,
) -> Result<Vec<JoinedRecord>> {
    join_with_observer(sources, targets, options, &mut NoopObserver).map(|output| output.records)
}

/// Like [`join`], reporting progress to `observer` and returning run counters.
///
/// # Errors
///
/// See [`JoinEngine::new`].
pub fn join_with_observer<O>(
    sources: &[SourceRecord],
    targets: &[TargetRecord],
    options: &JoinOptions,
    observer: &mut O,
) -> Result<JoinOutput>
where
    O: JoinObserver + ?Sized,
{
    let engine = JoinEngine::new(targets, options)?;
    Ok(engine.run(sources, observer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        total: Option<usize>,
        events: Vec<(usize, bool)>,
        finished: Option<JoinStats>,
    }

    impl JoinObserver for Recorder {
        fn on_start(&mut self, total: usize) {
            self.total = Some(total);
        }

        fn on_record(&mut self, processed: usize, matched: bool) {
            self.events.push((processed, matched));
        }

        fn on_finish(&mut self, stats: &JoinStats) {
            self.finished = Some(*stats);
        }
    }

    fn target(lat: f64, lon: f64) -> TargetRecord {
        TargetRecord::new(Coordinate::new(lat, lon))
    }

    fn source(id: &str, lat: f64, lon: f64) -> SourceRecord {
        SourceRecord::new(id, Coordinate::new(lat, lon))
    }

    #[test]
    fn rejects_invalid_thresholds() {
        let targets = vec![target(0.0, 0.0)];
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let options = JoinOptions::new().with_threshold_km(value);
            let err = JoinEngine::new(&targets, &options).unwrap_err();
            assert!(matches!(err, JoinError::InvalidThreshold { .. }));
        }
    }

    #[test]
    fn negative_threshold_discards_every_vendor() {
        let targets = vec![target(1.0, 1.0)];
        let sources = vec![source("A", 1.0, 1.0), source("B", 2.0, 2.0)];
        let options = JoinOptions::new().with_threshold_km(-1.0);
        let output =
            join_with_observer(&sources, &targets, &options, &mut NoopObserver).unwrap();
        assert!(output.records.is_empty());
        assert_eq!(
            output.stats,
            JoinStats {
                processed: 2,
                matched: 0,
                discarded: 2
            }
        );
    }

    #[test]
    fn zero_threshold_keeps_exact_matches_only() {
        let targets = vec![target(1.0, 1.0)];
        let options = JoinOptions::new().with_threshold_km(0.0);
        let engine = JoinEngine::new(&targets, &options).unwrap();
        assert!(engine.join_record(&source("A", 1.0, 1.0)).is_some());
        assert!(engine.join_record(&source("B", 1.0, 1.001)).is_none());
    }

    #[test]
    fn nearest_reports_position_and_distance() {
        let targets = vec![target(0.0, 0.0), target(10.0, 10.0)];
        let engine = JoinEngine::new(&targets, &JoinOptions::default()).unwrap();
        let nearest = engine.nearest(Coordinate::new(9.0, 9.0));
        assert_eq!(nearest.position, 1);
        let expected = haversine_km(Coordinate::new(9.0, 9.0), Coordinate::new(10.0, 10.0));
        assert!((nearest.distance_km - expected).abs() < 1e-12);
    }

    #[test]
    fn observer_sees_every_record_in_order() {
        let targets = vec![target(0.0, 0.0)];
        let sources = vec![
            source("near", 0.1, 0.1),
            source("far", 60.0, 60.0),
            source("near2", -0.2, 0.0),
        ];
        let mut recorder = Recorder::default();
        let output =
            join_with_observer(&sources, &targets, &JoinOptions::default(), &mut recorder)
                .unwrap();

        assert_eq!(recorder.total, Some(3));
        assert_eq!(recorder.events, vec![(1, true), (2, false), (3, true)]);
        let stats = recorder.finished.expect("finish called");
        assert_eq!(stats, output.stats);
        assert_eq!(
            stats,
            JoinStats {
                processed: 3,
                matched: 2,
                discarded: 1
            }
        );
    }

    #[test]
    fn observer_does_not_change_results() {
        let targets = vec![target(0.0, 0.0), target(5.0, 5.0)];
        let sources = vec![source("a", 0.5, 0.5), source("b", 4.0, 4.5)];
        let plain = join(&sources, &targets, &JoinOptions::default()).unwrap();
        let mut recorder = Recorder::default();
        let observed =
            join_with_observer(&sources, &targets, &JoinOptions::default(), &mut recorder)
                .unwrap();
        assert_eq!(plain, observed.records);
    }

    #[test]
    fn address_is_not_normalized() {
        let targets = vec![target(0.0, 0.0)];
        let mut vendor = source("X", 0.0, 0.0);
        vendor.address = Some(" Rua A\r\n10 ".to_string());
        vendor.state = Some(" SP\r\n".to_string());
        let joined = join(&[vendor], &targets, &JoinOptions::default()).unwrap();
        assert_eq!(joined[0].address.as_deref(), Some(" Rua A\r\n10 "));
        assert_eq!(joined[0].state.as_deref(), Some("SP"));
    }

    #[test]
    fn whitespace_city_becomes_empty_text() {
        let targets = vec![target(0.0, 0.0)];
        let mut vendor = source("X", 0.0, 0.0);
        vendor.city = Some("  ".to_string());
        let joined = join(&[vendor], &targets, &JoinOptions::default()).unwrap();
        assert_eq!(joined[0].city.as_deref(), Some(""));
        assert!(joined[0].state.is_none());
    }
}
