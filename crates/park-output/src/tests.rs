//! Integration tests for park-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{RideRunRow, RideSnapshotRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("ride_runs.csv").exists());
        assert!(dir.path().join("ride_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "ride_runs.csv"),
            ["ride_id", "subtype", "start_tick", "end_tick", "riders", "revenue"]
        );
        assert_eq!(
            headers(&dir, "ride_snapshots.csv"),
            ["tick", "ride_id", "subtype", "state", "waiting", "loaded", "revenue"]
        );
        assert_eq!(
            headers(&dir, "tick_summaries.csv"),
            ["tick", "unix_time_secs", "waiting", "riding", "walking", "departed", "total_revenue"]
        );
    }

    #[test]
    fn csv_ride_run_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_ride_run(&RideRunRow {
            ride_id:    2,
            subtype:    "water-ride".into(),
            start_tick: 10,
            end_tick:   15,
            riders:     8,
            revenue:    40,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "ride_runs.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "water-ride");
        assert_eq!(&rows[0][5], "40");
    }

    #[test]
    fn csv_state_with_space_survives() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let row = RideSnapshotRow {
            tick:    5,
            ride_id: 0,
            subtype: "carousel".into(),
            state:   "in operation",
            waiting: 3,
            loaded:  20,
            revenue: 60,
        };
        w.write_ride_snapshots(&[row]).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "ride_snapshots.csv");
        assert_eq!(&rows[0][3], "in operation");
        assert_eq!(&rows[0][5], "20");
    }

    #[test]
    fn csv_tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:           3,
            unix_time_secs: 180,
            waiting:        1,
            riding:         2,
            walking:        3,
            departed:       4,
            total_revenue:  25,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "180");
        assert_eq!(&rows[0][6], "25");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("no/such/dir")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use tempfile::TempDir;

    use park_core::{FixedWallClock, ParkConfig, Tick, TileCoord};
    use park_ride::RideTable;
    use park_sim::{Finances, ParkBuilder, ParkObserver, TickStats};
    use park_spatial::{DijkstraRouter, FootpathNetworkBuilder, GraphRouteProvider};
    use park_visitor::VisitorKind;

    use crate::{
        CsvWriter, OutputError, OutputResult, OutputWriter, ParkOutputObserver, RideRunRow,
        RideSnapshotRow, TickSummaryRow,
    };

    /// Fails every write with a distinguishable message.
    #[derive(Default)]
    struct FailingWriter {
        calls: usize,
    }

    impl FailingWriter {
        fn fail(&mut self) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.calls))))
        }
    }

    impl OutputWriter for FailingWriter {
        fn write_ride_run(&mut self, _: &RideRunRow) -> OutputResult<()> { self.fail() }
        fn write_ride_snapshots(&mut self, _: &[RideSnapshotRow]) -> OutputResult<()> { self.fail() }
        fn write_tick_summary(&mut self, _: &TickSummaryRow) -> OutputResult<()> { self.fail() }
        fn finish(&mut self) -> OutputResult<()> { self.fail() }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = ParkOutputObserver::new(FailingWriter::default());
        obs.on_tick_end(Tick(0), &TickStats::default());
        obs.on_tick_end(Tick(1), &TickStats::default());
        obs.on_sim_end(Tick(2), &Finances::default());

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("write 1"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 3);
    }

    #[test]
    fn integration_csv() {
        // gate(0,0) ─ n1(1,0) ─ coaster(2,0)
        let mut b = FootpathNetworkBuilder::new();
        let gate = b.add_node(TileCoord::new(0, 0));
        let n1 = b.add_node(TileCoord::new(1, 0));
        let coaster = b.add_node(TileCoord::new(2, 0));
        b.add_path(gate, n1, 1_000);
        b.add_path(n1, coaster, 1_000);
        let provider = GraphRouteProvider::new(b.build(), DijkstraRouter).with_max_rides(1);

        let config = ParkConfig {
            start_unix_secs:       0,
            tick_duration_secs:    60,
            total_ticks:           10,
            seed:                  1,
            output_interval_ticks: 5,
            walk_ticks_per_node:   1,
        };
        let mut park = ParkBuilder::new(config, RideTable::builtin(), provider)
            .wall_clock(FixedWallClock(0))
            .build()
            .unwrap();
        park.place_ride(TileCoord::new(2, 0), coaster, Some("rollercoaster")).unwrap();
        for name in ["Ada", "Bo"] {
            park.admit_visitor(name, VisitorKind::Adult, TileCoord::new(0, 0), gate).unwrap();
        }

        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = ParkOutputObserver::new(writer);
        park.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Board at T1, finish at T3 (2-minute run), leave at T5.
        let mut rdr = csv::Reader::from_path(dir.path().join("ride_runs.csv")).unwrap();
        let runs: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].iter().collect::<Vec<_>>(), ["0", "rollercoaster", "1", "3", "2", "10"]);

        // output_interval = 5 → snapshots at ticks 0 and 5, one ride each.
        let mut rdr = csv::Reader::from_path(dir.path().join("ride_snapshots.csv")).unwrap();
        let snaps: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(snaps.len(), 2);
        assert_eq!(&snaps[1][6], "10");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let ticks: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(ticks.len(), 10);
        assert_eq!(&ticks[2][1], "120");
        assert_eq!(&ticks[2][3], "2"); // riding
        let last = &ticks[9];
        assert_eq!(&last[5], "2"); // departed
        assert_eq!(&last[6], "10"); // total_revenue
    }
}
