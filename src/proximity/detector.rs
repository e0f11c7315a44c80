use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use super::{ProximityError, ProximityEvent, ScanSink};
use crate::catalog::{Catalog, CatalogEntry, ObjectId, OperationalState};
use crate::geometry::{GeodeticCoordinates, PROXIMITY_THRESHOLD_KM};
use crate::propagate::{KeplerianPropagator, PositionService, Propagator};
use crate::time::TimeGrid;

const DEFAULT_MAX_STEPS: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DetectorSettings {
    /// Pairs strictly closer than this are reported [km]
    #[serde(default = "default_threshold_km")]
    pub threshold_km: f64,
    /// Upper bound on grid instants per scan; `None` disables the guard.
    #[serde(default = "default_max_steps")]
    pub max_steps: Option<u64>,
}

fn default_threshold_km() -> f64 {
    PROXIMITY_THRESHOLD_KM
}

fn default_max_steps() -> Option<u64> {
    Some(DEFAULT_MAX_STEPS)
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            threshold_km: default_threshold_km(),
            max_steps: default_max_steps(),
        }
    }
}

impl DetectorSettings {
    /// The threshold must be a finite distance above zero.
    pub fn validate(&self) -> Result<(), ProximityError> {
        if self.threshold_km.is_finite() && self.threshold_km > 0.0 {
            Ok(())
        } else {
            Err(ProximityError::InvalidThreshold {
                threshold_km: self.threshold_km,
            })
        }
    }
}

/// Scans a time window on a fixed grid and reports every pair of active
/// objects that comes within the threshold distance at a grid instant.
pub struct ProximityDetector<P = KeplerianPropagator> {
    positions: PositionService<P>,
    settings: DetectorSettings,
}

impl<P: Propagator> ProximityDetector<P> {
    pub fn new(positions: PositionService<P>, settings: DetectorSettings) -> Self {
        log::debug!(
            "Initialized proximity detector with threshold: {} km",
            settings.threshold_km
        );
        Self {
            positions,
            settings,
        }
    }

    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }

    /// Walks the closed interval `[start, end]`, both snapped to the `step`
    /// grid. Consecutive instants of one encounter each yield their own event.
    /// An object that fails to propagate is reported to `sink` and left out of
    /// that instant; the scan carries on.
    pub fn detect<S: ScanSink + ?Sized>(
        &self,
        entries: &[CatalogEntry],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: TimeDelta,
        sink: &mut S,
    ) -> Result<Vec<ProximityEvent>, ProximityError> {
        let grid = self.plan(start, end, step)?;
        Ok(self.run(entries, &grid, sink))
    }

    /// Like [Self::detect], reading the active objects from `catalog`. An
    /// object whose orbit cannot be resolved is reported to `sink` and left
    /// out of the whole scan.
    pub fn scan<C: Catalog + ?Sized, S: ScanSink + ?Sized>(
        &self,
        catalog: &C,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: TimeDelta,
        sink: &mut S,
    ) -> Result<Vec<ProximityEvent>, ProximityError> {
        // reject the window before anything is reported to the sink
        self.plan(start, end, step)?;
        let entries: Vec<_> = catalog
            .objects_in_state(OperationalState::Active)
            .into_iter()
            .filter_map(|object| {
                let object_id = object.id;
                match catalog.join(object) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        sink.object_unresolved(object_id, &e);
                        None
                    }
                }
            })
            .collect();
        self.detect(&entries, start, end, step, sink)
    }

    fn plan(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        step: TimeDelta,
    ) -> Result<TimeGrid, ProximityError> {
        self.settings.validate()?;
        if start >= end {
            return Err(ProximityError::InvalidWindow { start, end });
        }

        let grid = TimeGrid::new(start, end, step)?;
        if let Some(limit) = self.settings.max_steps {
            let steps = grid.len();
            if steps > limit {
                return Err(ProximityError::TooManySteps { steps, limit });
            }
        }
        Ok(grid)
    }

    fn run<S: ScanSink + ?Sized>(
        &self,
        entries: &[CatalogEntry],
        grid: &TimeGrid,
        sink: &mut S,
    ) -> Vec<ProximityEvent> {
        sink.scan_started(grid, entries.len());

        let mut events = Vec::new();
        for at in grid.instants() {
            let positions = self.positions_at(entries, at, sink);
            self.collect_pairs(&positions, at, sink, &mut events);
        }

        sink.scan_finished(grid.len(), events.len());
        events
    }

    /// Positions of the active, already introduced objects, ascending by id.
    fn positions_at<S: ScanSink + ?Sized>(
        &self,
        entries: &[CatalogEntry],
        at: DateTime<Utc>,
        sink: &mut S,
    ) -> Vec<(ObjectId, GeodeticCoordinates)> {
        let mut positions: Vec<_> = entries
            .iter()
            .filter(|entry| entry.object.is_active())
            .filter_map(|entry| {
                match self.positions.position_at(&entry.object, &entry.orbit, at) {
                    Ok(position) => position.map(|p| (entry.object.id, p)),
                    Err(e) => {
                        sink.object_skipped(entry.object.id, at, &e);
                        None
                    }
                }
            })
            .collect();
        positions.sort_by_key(|(id, _)| *id);
        positions
    }

    fn collect_pairs<S: ScanSink + ?Sized>(
        &self,
        positions: &[(ObjectId, GeodeticCoordinates)],
        at: DateTime<Utc>,
        sink: &mut S,
        events: &mut Vec<ProximityEvent>,
    ) {
        for (i, (id_a, pos_a)) in positions.iter().enumerate() {
            for (id_b, pos_b) in &positions[i + 1..] {
                let distance_km = pos_a.distance_km(pos_b);
                if distance_km < self.settings.threshold_km {
                    let event = ProximityEvent {
                        object_a: *id_a.min(id_b),
                        object_b: *id_a.max(id_b),
                        at,
                        location: *pos_a,
                        distance_km,
                    };
                    sink.proximity_detected(&event);
                    events.push(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Orbit, OrbitId, TrackedObject};
    use rstest::rstest;
    use crate::geometry::EARTH_BASE_RADIUS_KM;
    use crate::propagate::PropagationError;
    use crate::time::TimeError;
    use chrono::TimeZone;

    #[derive(Default)]
    struct RecordingSink {
        started: usize,
        detected: Vec<(ObjectId, ObjectId)>,
        skipped: Vec<(ObjectId, DateTime<Utc>)>,
        unresolved: Vec<ObjectId>,
        finished: Option<(u64, usize)>,
    }

    impl ScanSink for RecordingSink {
        fn scan_started(&mut self, _grid: &TimeGrid, _objects: usize) {
            self.started += 1;
        }

        fn proximity_detected(&mut self, event: &ProximityEvent) {
            self.detected.push((event.object_a, event.object_b));
        }

        fn object_skipped(&mut self, object_id: ObjectId, at: DateTime<Utc>, _: &PropagationError) {
            self.skipped.push((object_id, at));
        }

        fn object_unresolved(&mut self, object_id: ObjectId, _: &CatalogError) {
            self.unresolved.push(object_id);
        }

        fn scan_finished(&mut self, steps: u64, events: usize) {
            self.finished = Some((steps, events));
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn orbit(id: u32, altitude_km: f64) -> Orbit {
        Orbit {
            id,
            name: format!("orbit-{id}"),
            altitude_km,
            inclination_deg: 0.0,
            raan_deg: 0.0,
        }
    }

    fn entry(id: u32, longitude: f64, orbit: &Orbit) -> CatalogEntry {
        CatalogEntry {
            object: TrackedObject {
                id,
                name: format!("object-{id}"),
                operator: "ops".into(),
                introduced_at: t0(),
                state: OperationalState::Active,
                starting_longitude_deg: longitude,
                orbit_id: orbit.id,
            },
            orbit: orbit.clone(),
        }
    }

    fn detector_with(settings: DetectorSettings) -> ProximityDetector {
        ProximityDetector::new(PositionService::default(), settings)
    }

    fn detector() -> ProximityDetector {
        detector_with(DetectorSettings::default())
    }

    #[test]
    fn co_orbiting_pair_is_reported_every_step() {
        let leo = orbit(1, 500.0);
        // listed out of id order on purpose
        let entries = vec![entry(9, 0.00001, &leo), entry(4, 0.0, &leo)];
        let mut sink = RecordingSink::default();

        let events = detector()
            .detect(&entries, t0(), t0() + TimeDelta::minutes(3), TimeDelta::minutes(1), &mut sink)
            .unwrap();

        // same orbit, same epoch: the gap never changes
        assert_eq!(events.len(), 4);
        for (event, minute) in events.iter().zip(0..) {
            assert_eq!((event.object_a, event.object_b), (4, 9));
            assert_eq!(event.at, t0() + TimeDelta::minutes(minute));
            assert!(event.distance_km < PROXIMITY_THRESHOLD_KM);
        }
        assert_eq!(sink.started, 1);
        assert_eq!(sink.detected.len(), 4);
        assert_eq!(sink.finished, Some((4, 4)));
    }

    #[test]
    fn location_is_that_of_lower_id() {
        let leo = orbit(1, 500.0);
        let entries = vec![entry(2, 0.00001, &leo), entry(1, 0.0, &leo)];
        let events = detector()
            .detect(&entries, t0(), t0() + TimeDelta::seconds(1), TimeDelta::seconds(1), &mut RecordingSink::default())
            .unwrap();
        let first = &events[0];
        assert_eq!(first.object_a, 1);
        assert!(first.location.longitude_deg.abs() < 1e-9);
    }

    #[test]
    fn distant_objects_produce_no_events() {
        let leo = orbit(1, 500.0);
        let entries = vec![entry(1, 0.0, &leo), entry(2, 90.0, &leo), entry(3, -90.0, &leo)];
        let events = detector()
            .detect(&entries, t0(), t0() + TimeDelta::hours(1), TimeDelta::minutes(5), &mut RecordingSink::default())
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let leo = orbit(1, 500.0);
        let entries = vec![entry(1, 0.0, &leo), entry(2, 0.00001, &leo)];
        let (start, end) = (t0(), t0() + TimeDelta::seconds(1));
        let positions = PositionService::<KeplerianPropagator>::default();
        let gaps: Vec<f64> = [start, end]
            .into_iter()
            .map(|at| {
                let a = positions.position_at(&entries[0].object, &leo, at).unwrap().unwrap();
                let b = positions.position_at(&entries[1].object, &leo, at).unwrap().unwrap();
                a.distance_km(&b)
            })
            .collect();
        let smallest = gaps.iter().copied().fold(f64::INFINITY, f64::min);
        let largest = gaps.iter().copied().fold(0.0, f64::max);

        // no instant is strictly closer than the smallest gap
        let at_gap = detector_with(DetectorSettings {
            threshold_km: smallest,
            ..DetectorSettings::default()
        });
        let events = at_gap
            .detect(&entries, start, end, TimeDelta::seconds(1), &mut RecordingSink::default())
            .unwrap();
        assert!(events.is_empty());

        let above_gap = detector_with(DetectorSettings {
            threshold_km: largest * 1.001,
            ..DetectorSettings::default()
        });
        let events = above_gap
            .detect(&entries, start, end, TimeDelta::seconds(1), &mut RecordingSink::default())
            .unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn pair_exactly_at_threshold_is_not_reported() {
        let detector = detector_with(DetectorSettings {
            threshold_km: 1.0,
            ..DetectorSettings::default()
        });
        // 1 km straight up
        let positions = vec![
            (1, GeodeticCoordinates::new(0.0, 0.0, 500.0)),
            (2, GeodeticCoordinates::new(0.0, 0.0, 501.0)),
        ];
        let mut sink = RecordingSink::default();
        let mut events = Vec::new();
        detector.collect_pairs(&positions, t0(), &mut sink, &mut events);
        assert!(events.is_empty());

        let positions = vec![
            (1, GeodeticCoordinates::new(0.0, 0.0, 500.0)),
            (2, GeodeticCoordinates::new(0.0, 0.0, 500.999)),
        ];
        detector.collect_pairs(&positions, t0(), &mut sink, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn inactive_and_unintroduced_objects_are_skipped_silently() {
        let leo = orbit(1, 500.0);
        let mut inactive = entry(2, 0.00001, &leo);
        inactive.object.state = OperationalState::Inactive;
        let mut deorbited = entry(3, 0.00002, &leo);
        deorbited.object.state = OperationalState::Deorbited;
        let mut future = entry(4, 0.00003, &leo);
        future.object.introduced_at = t0() + TimeDelta::days(1);

        let entries = vec![entry(1, 0.0, &leo), inactive, deorbited, future];
        let mut sink = RecordingSink::default();
        let events = detector()
            .detect(&entries, t0(), t0() + TimeDelta::minutes(10), TimeDelta::minutes(1), &mut sink)
            .unwrap();

        assert!(events.is_empty());
        assert!(sink.skipped.is_empty());
    }

    #[test]
    fn object_joins_once_introduced() {
        let leo = orbit(1, 500.0);
        let mut late = entry(2, 0.0, &leo);
        // introduced two minutes in, starting right on top of object 1's track
        late.object.introduced_at = t0() + TimeDelta::minutes(2);
        let early = entry(1, 0.0, &leo);
        let omega_deg_per_s = crate::geometry::OrbitalParameters::from_orbit(&leo)
            .angular_velocity_rad_s()
            .to_degrees();
        late.object.starting_longitude_deg = omega_deg_per_s * 120.0;

        let events = detector()
            .detect(&[early, late], t0(), t0() + TimeDelta::minutes(4), TimeDelta::minutes(1), &mut RecordingSink::default())
            .unwrap();
        let instants: Vec<_> = events.iter().map(|e| e.at).collect();
        assert_eq!(
            instants,
            vec![
                t0() + TimeDelta::minutes(2),
                t0() + TimeDelta::minutes(3),
                t0() + TimeDelta::minutes(4)
            ]
        );
    }

    #[test]
    fn failing_object_does_not_abort_the_scan() {
        let leo = orbit(1, 500.0);
        let collapsed = orbit(2, -EARTH_BASE_RADIUS_KM);
        let entries = vec![
            entry(1, 0.0, &leo),
            entry(2, 0.0, &collapsed),
            entry(3, 0.00001, &leo),
        ];
        let mut sink = RecordingSink::default();
        let events = detector()
            .detect(&entries, t0(), t0() + TimeDelta::minutes(2), TimeDelta::minutes(1), &mut sink)
            .unwrap();

        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| (e.object_a, e.object_b) == (1, 3)));
        assert_eq!(
            sink.skipped,
            vec![
                (2, t0()),
                (2, t0() + TimeDelta::minutes(1)),
                (2, t0() + TimeDelta::minutes(2))
            ]
        );
    }

    #[test]
    fn zero_or_one_active_object_yields_nothing() {
        let leo = orbit(1, 500.0);
        let window = (t0(), t0() + TimeDelta::hours(2));
        for entries in [vec![], vec![entry(1, 0.0, &leo)]] {
            let events = detector()
                .detect(&entries, window.0, window.1, TimeDelta::minutes(1), &mut RecordingSink::default())
                .unwrap();
            assert!(events.is_empty());
        }
    }

    #[test]
    fn rejects_empty_window() {
        let result = detector().detect(&[], t0(), t0(), TimeDelta::minutes(1), &mut RecordingSink::default());
        assert!(matches!(result, Err(ProximityError::InvalidWindow { .. })));
    }

    #[test]
    fn rejects_non_positive_step() {
        let result = detector().detect(
            &[],
            t0(),
            t0() + TimeDelta::hours(1),
            TimeDelta::zero(),
            &mut RecordingSink::default(),
        );
        assert_eq!(result, Err(ProximityError::Time(TimeError::NonPositiveStep)));
    }

    #[test]
    fn guards_against_unbounded_grids() {
        let detector = detector_with(DetectorSettings {
            max_steps: Some(60),
            ..DetectorSettings::default()
        });
        let mut sink = RecordingSink::default();
        let result = detector.detect(&[], t0(), t0() + TimeDelta::hours(1), TimeDelta::minutes(1), &mut sink);
        assert_eq!(result, Err(ProximityError::TooManySteps { steps: 61, limit: 60 }));
        assert_eq!(sink.started, 0);

        let unbounded = detector_with(DetectorSettings {
            max_steps: None,
            ..DetectorSettings::default()
        });
        assert!(unbounded
            .detect(&[], t0(), t0() + TimeDelta::hours(1), TimeDelta::seconds(1), &mut sink)
            .is_ok());
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: DetectorSettings = serde_yaml::from_str("threshold_km: 0.5").unwrap();
        assert_eq!(settings.threshold_km, 0.5);
        assert_eq!(settings.max_steps, Some(DEFAULT_MAX_STEPS));

        let settings: DetectorSettings = serde_yaml::from_str("max_steps: null").unwrap();
        assert_eq!(settings.max_steps, None);
        assert_eq!(settings.threshold_km, PROXIMITY_THRESHOLD_KM);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-0.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_threshold(#[case] threshold_km: f64) {
        let settings = DetectorSettings {
            threshold_km,
            ..DetectorSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ProximityError::InvalidThreshold { .. })
        ));

        let mut sink = RecordingSink::default();
        let result = detector_with(settings).detect(
            &[],
            t0(),
            t0() + TimeDelta::minutes(1),
            TimeDelta::minutes(1),
            &mut sink,
        );
        assert!(matches!(result, Err(ProximityError::InvalidThreshold { .. })));
        assert_eq!(sink.started, 0);
    }

    /// Catalog that hands out objects without checking their orbit references.
    struct LooseCatalog {
        orbits: Vec<Orbit>,
        objects: Vec<TrackedObject>,
    }

    impl Catalog for LooseCatalog {
        fn orbit(&self, id: OrbitId) -> Result<Orbit, CatalogError> {
            self.orbits
                .iter()
                .find(|o| o.id == id)
                .cloned()
                .ok_or(CatalogError::OrbitNotFound(id))
        }

        fn orbits(&self) -> Vec<Orbit> {
            self.orbits.clone()
        }

        fn object(&self, id: ObjectId) -> Result<TrackedObject, CatalogError> {
            self.objects
                .iter()
                .find(|o| o.id == id)
                .cloned()
                .ok_or(CatalogError::ObjectNotFound(id))
        }

        fn objects(&self) -> Vec<TrackedObject> {
            self.objects.clone()
        }
    }

    #[test]
    fn scan_skips_objects_with_dangling_orbits() {
        let leo = orbit(1, 500.0);
        let mut dangling_active = entry(3, 0.000005, &leo).object;
        dangling_active.orbit_id = 99;
        let mut dangling_inactive = entry(4, 0.0, &leo).object;
        dangling_inactive.orbit_id = 98;
        dangling_inactive.state = OperationalState::Inactive;
        let catalog = LooseCatalog {
            orbits: vec![leo.clone()],
            objects: vec![
                entry(1, 0.0, &leo).object,
                entry(2, 0.00001, &leo).object,
                dangling_active,
                dangling_inactive,
            ],
        };

        let mut sink = RecordingSink::default();
        let events = detector()
            .scan(&catalog, t0(), t0() + TimeDelta::minutes(2), TimeDelta::minutes(1), &mut sink)
            .unwrap();

        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| (e.object_a, e.object_b) == (1, 2)));
        // inactive objects are never joined
        assert_eq!(sink.unresolved, vec![3]);
        // single lookups stay strict
        assert!(matches!(
            catalog.entry(3),
            Err(CatalogError::MissingOrbit { object: 3, orbit: 99 })
        ));
    }

    #[test]
    fn scan_validates_before_touching_the_catalog() {
        let leo = orbit(1, 500.0);
        let mut dangling = entry(1, 0.0, &leo).object;
        dangling.orbit_id = 99;
        let catalog = LooseCatalog {
            orbits: vec![],
            objects: vec![dangling],
        };
        let mut sink = RecordingSink::default();
        let result = detector().scan(&catalog, t0(), t0(), TimeDelta::minutes(1), &mut sink);
        assert!(matches!(result, Err(ProximityError::InvalidWindow { .. })));
        assert!(sink.unresolved.is_empty());
    }
}
