//! Bytes in, widgets out

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use relaydash_core::config::{LayoutMode, Rgb};
use relaydash_core::layout::{BucketId, Plan};
use relaydash_core::{Dashboard, SharedDashboard, SourceFeed};
use relaydash_display::{DisplayList, Font};
use relaydash_protocol::Source;

fn frame(json: &str) -> Vec<u8> {
    let mut bytes = format!("{:08}", json.len()).into_bytes();
    bytes.extend_from_slice(json.as_bytes());
    bytes
}

fn message(layout: &str, extra_config: &str, sensors: &str) -> String {
    format!(
        r#"{{"metadata":{{"CustomMetadata":{{{}}}}},"sensors":{{{}}}}}"#,
        format_args!(r#""Layout":"{layout}"{extra_config}"#),
        sensors
    )
}

fn reading(
    tag: &str,
    value: &str,
    unit: &str,
    order: i32,
    category: &str,
    component: &str,
) -> String {
    format!(
        r#""{tag}":[{{"Unit":"{unit}","Value":"{value}","SensorOrder":{order},{}}}]"#,
        format_args!(r#""Category":"{category}","ComponentName":"{component}""#)
    )
}

fn cpu_and_others(gpu_temp: &str) -> String {
    [
        reading("Core 1", "71.5", "%", 2, "Load", "CPU"),
        reading("Core 0", "12", "%", 1, "Load", "CPU"),
        reading("GPU Temp", gpu_temp, "°C", 1, "Temperature", "GPU"),
        reading("Fan", "1200", "rpm", 0, "Fan", "Board"),
    ]
    .join(",")
}

fn shared() -> SharedDashboard<NoopRawMutex, DisplayList> {
    let mut dashboard = Dashboard::new(DisplayList::new());
    dashboard.boot().unwrap();
    SharedDashboard::new(dashboard)
}

#[test]
fn test_splash_until_first_message() {
    let shared = shared();
    shared.with(|d| {
        assert_eq!(d.target().screen().splash(), Some("Junction Relay"));
        assert_eq!(d.target().screen().layout(), None);
    });
}

#[test]
fn test_data_grid_end_to_end() {
    let shared = shared();
    let mut feed = SourceFeed::new(Source::Network, &shared);

    let json = message(
        "DataGrid",
        concat!(
            r#","OtherGridRows":2,"OtherGridCols":2,"#,
            r##""OtherGridLabelFontSize":22,"TextColor":"#FFAA00""##,
        ),
        &cpu_and_others("55"),
    );
    let bytes = frame(&json);
    for chunk in bytes.chunks(13) {
        feed.feed(chunk);
    }
    assert_eq!(feed.stats().applied, 1);

    shared.with(|d| {
        let screen = d.target().screen();
        assert_eq!(screen.splash(), None);
        assert_eq!(screen.layout(), Some(LayoutMode::DataGrid));

        let all = screen.region(BucketId::All).unwrap();
        assert_eq!((all.rows, all.cols), (2, 2));
        // Document order, not sorted
        let labels: Vec<&str> = all.cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Core 1", "Core 0", "GPU Temp", "Fan"]);
        assert_eq!(all.cells[2].value.as_str(), "55 °C");
        assert_eq!((all.cells[3].row, all.cells[3].col), (1, 1));
        assert_eq!(all.cells[0].label_font, Font::Pt22);
        assert_eq!(all.cells[0].color, Rgb::from_hex(0xFFAA00));
    });
}

#[test]
fn test_dials_update_keeps_widget_tree() {
    let shared = shared();
    let mut feed = SourceFeed::new(Source::Serial, &shared);

    feed.feed(&frame(&message("CPUDials", "", &cpu_and_others("55"))));
    feed.feed(&frame(&message(
        "CPUDials",
        r##","TextColor":"#000000""##,
        &cpu_and_others("64"),
    )));

    shared.with(|d| {
        assert_eq!(d.target().rebuilds(), 1);
        let screen = d.target().screen();

        assert_eq!(screen.bars(), Some(&[12, 71][..]));

        let primary = screen.region(BucketId::Primary).unwrap();
        let labels: Vec<&str> = primary.cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Core 0", "Core 1"]);
        assert_eq!(primary.cells[0].color, Rgb::BLACK);

        let gauges = &screen.region(BucketId::Secondary).unwrap().gauges;
        assert_eq!(gauges[0].label.as_str(), "Fan");
        assert_eq!(gauges[0].value, 100);
        assert_eq!(gauges[1].label.as_str(), "GPU Temp");
        assert_eq!(gauges[1].value, 64);
        assert_eq!(gauges[1].color, Rgb::BLACK);
    });
}

#[test]
fn test_grid_change_rebuilds() {
    let shared = shared();
    let mut feed = SourceFeed::new(Source::Network, &shared);

    feed.feed(&frame(&message("CPUDash", "", &cpu_and_others("55"))));
    feed.feed(&frame(&message(
        "CPUDash",
        r#","OtherGridCellPadding":4"#,
        &cpu_and_others("55"),
    )));

    shared.with(|d| {
        assert_eq!(d.target().rebuilds(), 2);
        let secondary = d.target().screen().region(BucketId::Secondary).unwrap();
        assert_eq!(secondary.cells[0].padding, 4);
        assert_eq!(secondary.cells[0].label.as_str(), "Fan");
    });
}

#[test]
fn test_bad_messages_do_not_disturb_screen() {
    let shared = shared();
    let mut feed = SourceFeed::new(Source::Network, &shared);

    feed.feed(&frame(&message("DataGrid", "", &cpu_and_others("55"))));
    let before = shared.with(|d| d.target().screen().clone());

    // Empty frame, then an unprefixed document, then truncated JSON
    feed.feed(b"0000000a");
    feed.feed(br#"{"metadata":{}}"#);
    feed.feed(&frame(r#"{"metadata":"#));

    let stats = feed.stats();
    assert_eq!(stats.applied, 1);
    assert_eq!(stats.parse_errors, 2);
    shared.with(|d| assert_eq!(d.target().screen(), &before));
}

#[test]
fn test_two_transports_share_one_display() {
    let shared = shared();
    let mut network = SourceFeed::new(Source::Network, &shared);
    let mut serial = SourceFeed::new(Source::Serial, &shared);

    let grid = frame(&message("DataGrid", "", &cpu_and_others("55")));
    let dials = frame(&message("CPUDials", "", &cpu_and_others("30")));

    let mut serial_reader: &[u8] = &dials;
    let mut buf = [0u8; 16];
    network.feed(&grid[..40]);
    let serial_stats = block_on(serial.run(&mut serial_reader, &mut buf)).unwrap();
    network.feed(&grid[40..]);

    assert_eq!(serial_stats.applied, 1);
    assert_eq!(network.stats().applied, 1);
    shared.with(|d| {
        let planner = d.planner();
        assert_eq!(d.target().screen().layout(), Some(LayoutMode::DataGrid));
        assert_eq!(d.target().rebuilds(), 2);
        let applied = planner.state().applied.unwrap();
        assert_eq!(planner.plan(&applied), Plan::Update(LayoutMode::DataGrid));
    });
}
