use jitmap::analysis::analyze_samples;
use jitmap::domain::{Address, SymbolKind, TraceError};
use jitmap::export::{dump_entries, ReplayExporter};
use jitmap::profiling::{ResolvedFrame, TraceSession};
use jitmap::trace_data::TraceData;

const TRACE_PATH: &str = "tests/fixtures/simple_trace.json";

fn replay_fixture() -> jitmap::profiling::SessionReport {
    let data = TraceData::from_file(TRACE_PATH).expect("Failed to parse trace file");
    let mut session = TraceSession::new();
    session.replay(data.events);
    session.finish()
}

fn frame_names(frames: &[ResolvedFrame]) -> Vec<&str> {
    frames.iter().map(ResolvedFrame::function).collect()
}

#[test]
fn test_parse_trace_from_file_succeeds() {
    let data = TraceData::from_file(TRACE_PATH).expect("Failed to parse trace file");
    assert_eq!(data.len(), 12);
    assert_eq!(data.tick_count(), 5);
}

#[test]
fn test_missing_trace_file_is_io_error() {
    let err = TraceData::from_file("tests/fixtures/does_not_exist.json").unwrap_err();
    assert!(matches!(err, TraceError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn test_replay_resolves_each_tick_against_live_code() {
    let report = replay_fixture();
    let samples = &report.samples;
    assert_eq!(samples.len(), 5);

    assert_eq!(
        frame_names(&samples[0].frames),
        ["foo app.js:10", "bar app.js:42", "ArgumentsAdaptorTrampoline"]
    );
    assert_eq!(frame_names(&samples[1].frames), ["bar app.js:42", "ArgumentsAdaptorTrampoline"]);
    // foo was recompiled over, the old address no longer resolves
    assert_eq!(frame_names(&samples[2].frames), ["<unknown>"]);
    // trampoline moved; its old address is empty now
    assert_eq!(frame_names(&samples[3].frames), ["ArgumentsAdaptorTrampoline", "<unknown>"]);
    assert_eq!(frame_names(&samples[4].frames), ["foo app.js:10 (optimized)"]);
}

#[test]
fn test_replay_offsets_and_kinds() {
    let report = replay_fixture();
    let top = report.samples[0].top().expect("top frame");
    let symbol = top.symbol.as_ref().expect("resolved");

    assert_eq!(top.addr, Address(0x2c1a_0110));
    assert_eq!(symbol.start, Address(0x2c1a_0100));
    assert_eq!(symbol.kind, SymbolKind::LAZY_COMPILE);
}

#[test]
fn test_replay_stats() {
    let stats = replay_fixture().stats;
    assert_eq!(stats.created, 4);
    assert_eq!(stats.moved, 1);
    assert_eq!(stats.deleted, 1);
    assert_eq!(stats.ticks, 5);
    assert_eq!(stats.replaced, 1);
    assert_eq!(stats.unresolved_moves, 0);
    assert_eq!(stats.unresolved_deletes, 1);
}

#[test]
fn test_final_table_dump() {
    let report = replay_fixture();
    let entries = dump_entries(&report.table);

    let rows: Vec<(&str, &str, u64)> =
        entries.iter().map(|e| (e.name.as_str(), e.start.as_str(), e.length)).collect();
    assert_eq!(
        rows,
        [
            ("foo app.js:10 (optimized)", "2c1a0140", 128),
            ("ArgumentsAdaptorTrampoline", "2c1b0000", 64),
        ]
    );
}

#[test]
fn test_hotspots_cover_every_tick() {
    let report = replay_fixture();
    let hotspots = analyze_samples(&report.samples);

    assert_eq!(hotspots.len(), 5);
    assert_eq!(hotspots.iter().map(|h| h.count).sum::<usize>(), 5);
    assert!(hotspots.iter().all(|h| (h.percentage - 20.0).abs() < 0.01));
}

#[test]
fn test_export_to_file() {
    let report = replay_fixture();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("replay.json");

    ReplayExporter::new(&report).export_to_file(&path).expect("Failed to export");

    let content = std::fs::read_to_string(&path).expect("read export");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("Invalid JSON");
    assert_eq!(parsed["stats"]["ticks"], 5);
    assert_eq!(parsed["samples"].as_array().map(Vec::len), Some(5));
    assert_eq!(parsed["symbols"][1]["name"], "ArgumentsAdaptorTrampoline");
}
