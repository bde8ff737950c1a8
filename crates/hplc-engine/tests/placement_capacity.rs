use hplc_core::{
    CellContent, HplcError, PlateGrid, RawSample, TrayGroup, TrayLabel, WellPosition,
    PLATE_COLUMNS, PLATE_ROWS,
};
use hplc_engine::placement::{assign_plate, assign_plates, assign_vials, check_unique_wells};

fn trays(labels: &[&str]) -> Vec<TrayLabel> {
    labels.iter().copied().map(TrayLabel::from).collect()
}

fn vials(count: usize) -> Vec<RawSample> {
    (1..=count).map(|i| RawSample::vial(format!("V{i}"))).collect()
}

fn full_plate(name: &str) -> PlateGrid {
    let mut grid = PlateGrid::new(name);
    for row in PLATE_ROWS {
        for column in 1..=PLATE_COLUMNS {
            grid.push(
                WellPosition::new(row, column),
                CellContent::Text(format!("{name}_{row}{column}")),
            );
        }
    }
    grid
}

#[test]
fn forty_first_vial_starts_the_next_tray() {
    let placement = assign_vials(&vials(41), &trays(&["G", "B"])).expect("placement");
    assert_eq!(placement.samples.len(), 41);
    for (index, placed) in placement.samples.iter().take(40).enumerate() {
        assert_eq!(placed.tray, TrayLabel::from("G"));
        assert_eq!(Some(placed.well), WellPosition::vial_slot(index));
        assert_eq!(placed.pass, 0);
    }
    assert_eq!(placement.samples[0].well, WellPosition::new('A', 1));
    assert_eq!(placement.samples[7].well, WellPosition::new('A', 8));
    assert_eq!(placement.samples[8].well, WellPosition::new('B', 1));
    assert_eq!(placement.samples[39].well, WellPosition::new('E', 8));
    let last = &placement.samples[40];
    assert_eq!(last.tray, TrayLabel::from("B"));
    assert_eq!(last.well, WellPosition::new('A', 1));
    assert_eq!(placement.trays.len(), 2);
}

#[test]
fn vial_trays_are_reused_round_robin() {
    let placement = assign_vials(&vials(81), &trays(&["B"])).expect("placement");
    let passes: Vec<usize> = placement.trays.iter().map(|t| t.pass).collect();
    assert_eq!(passes, vec![0, 1, 2]);
    assert!(placement.samples.iter().all(|p| p.tray == TrayLabel::from("B")));
    assert_eq!(placement.samples[80].well, WellPosition::new('A', 1));
    check_unique_wells(&placement.samples).expect("passes keep wells distinct");
}

#[test]
fn omitted_entries_keep_their_slot() {
    let samples = vec![
        RawSample::vial("A1"),
        RawSample::vial("OMIT_gap"),
        RawSample::vial("A2"),
    ];
    let placement = assign_vials(&samples, &trays(&["B"])).expect("placement");
    assert_eq!(placement.samples[1].well, WellPosition::new('A', 2));
    assert_eq!(placement.samples[2].well, WellPosition::new('A', 3));
}

#[test]
fn empty_vial_pool_is_a_configuration_error() {
    let err = assign_vials(&vials(1), &[]).expect_err("no vial trays");
    assert!(matches!(err, HplcError::Config(_)));
    assert_eq!(err.info().code, "placement.pool_empty");
    assert!(assign_vials(&[], &[]).expect("nothing to place").samples.is_empty());
}

#[test]
fn empty_plate_pool_is_a_configuration_error() {
    let err = assign_plates(&[full_plate("P1")], &[]).expect_err("no plate trays");
    assert!(matches!(err, HplcError::Config(_)));
}

#[test]
fn plate_cells_map_to_wells_and_skip_non_text() {
    let mut grid = PlateGrid::new("PLATE_A");
    grid.push(WellPosition::new('A', 1), CellContent::Text("S1".into()));
    grid.push(WellPosition::new('A', 2), CellContent::Empty);
    grid.push(WellPosition::new('A', 3), CellContent::Number(4.0));
    grid.push(WellPosition::new('H', 12), CellContent::Text("S2".into()));
    let placed = assign_plate(&grid, &TrayLabel::from("R"), 0);
    assert_eq!(placed.len(), 2);
    assert_eq!(placed[0].well, WellPosition::new('A', 1));
    assert_eq!(placed[1].well, WellPosition::new('H', 12));
    assert_eq!(placed[1].sample, RawSample::plate("S2", "PLATE_A", WellPosition::new('H', 12)));
}

#[test]
fn plates_cycle_through_the_plate_pool() {
    let grids = vec![full_plate("P1"), full_plate("P2"), full_plate("P3")];
    let placement = assign_plates(&grids, &trays(&["R", "G"])).expect("placement");
    let assigned: Vec<(String, usize)> = placement
        .trays
        .iter()
        .map(|t| (t.tray.to_string(), t.pass))
        .collect();
    assert_eq!(
        assigned,
        vec![("R".into(), 0), ("G".into(), 0), ("R".into(), 1)]
    );
    assert_eq!(
        placement.trays[2].group,
        TrayGroup::Plate { name: "P3".into() }
    );
    assert_eq!(placement.samples.len(), 3 * 96);
    check_unique_wells(&placement.samples).expect("distinct wells");
}

#[test]
fn duplicate_wells_are_reported() {
    let mut grid = PlateGrid::new("BROKEN");
    grid.push(WellPosition::new('A', 1), CellContent::Text("S1".into()));
    grid.push(WellPosition::new('A', 1), CellContent::Text("S2".into()));
    let placed = assign_plate(&grid, &TrayLabel::from("R"), 0);
    let err = check_unique_wells(&placed).expect_err("collision");
    assert_eq!(err.info().code, "placement.well_collision");
}
