//! Editing session scenarios against the library API

use dse::core::{
    Action, CommitState, ConstraintTable, EditSession, FieldEdit, ParameterModel, RecordingForm,
    RecordingOwner,
};
use dse::entities::{Field, FieldValue, ParameterRecord};

fn open_default() -> EditSession<RecordingForm, RecordingOwner> {
    EditSession::open(
        ParameterRecord::default(),
        ConstraintTable::default(),
        RecordingForm::default(),
        RecordingOwner::default(),
    )
}

// ============================================================================
// Derived Volume
// ============================================================================

#[test]
fn test_defaults_then_axes_give_reference_volume() {
    let mut session = open_default();
    session.report_field_edit(Field::DVx, FieldEdit::Entry(10.0));
    session.report_field_edit(Field::DVy, FieldEdit::Entry(5.0));
    session.report_field_edit(Field::DVz, FieldEdit::Entry(4.0));

    let expected = 4.0 / 3.0 * std::f64::consts::PI * 10.0 * 5.0 * 4.0;
    let pending = session.model().snapshot_pending();
    assert!((pending.volume - expected).abs() < 1e-9);
    assert!((pending.volume - 837.76).abs() < 0.01);
}

#[test]
fn test_volume_is_redisplayed_after_each_axis_edit() {
    let mut session = open_default();
    for (field, value) in [(Field::DVx, 100.0), (Field::DVy, 200.0), (Field::DVz, 300.0)] {
        session.report_field_edit(field, FieldEdit::Entry(value));
        let shown = session.form().last(Field::Volume).unwrap();
        assert_eq!(shown, session.model().pending().get(Field::Volume));
    }
}

// ============================================================================
// Wrap-around
// ============================================================================

#[test]
fn test_easting_increment_at_max_wraps_to_min() {
    let mut session = open_default();
    session.report_field_edit(Field::Easting, FieldEdit::Entry(10_000_000.0));
    session.report_field_edit(Field::Easting, FieldEdit::Step(1));
    assert_eq!(session.model().pending().easting, -10_000_000);
}

#[test]
fn test_integral_fields_wrap_both_ways() {
    let table = ConstraintTable::default();
    for field in Field::EDITABLE.iter().filter(|f| f.is_integral()) {
        let c = table.get(*field).unwrap();
        let mut model = ParameterModel::default();

        model.set_field(*field, c.max);
        assert_eq!(model.step_field(*field, 1).as_f64(), c.min, "{} up", field);
        assert_eq!(model.step_field(*field, -1).as_f64(), c.max, "{} down", field);
    }
}

#[test]
fn test_in_range_edits_are_identity() {
    let mut model = ParameterModel::default();
    let cases = [
        (Field::Easting, -2_500.0),
        (Field::Northing, 7_300.0),
        (Field::Depth, 4_000.0),
        (Field::DVx, 125.0),
        (Field::RotationX, 33.3),
        (Field::RotationY, 360.0),
        (Field::Nu, 0.25),
    ];
    for (field, value) in cases {
        assert_eq!(model.set_field(field, value).as_f64(), value, "{}", field);
    }
}

#[test]
fn test_lengths_never_negative() {
    let mut session = open_default();
    for field in [Field::Depth, Field::DVx, Field::DVy, Field::DVz] {
        session.report_field_edit(field, FieldEdit::Step(-1));
        session.report_field_edit(field, FieldEdit::Entry(-12_345.0));
    }
    let p = session.model().pending();
    assert!(p.depth >= 0 && p.d_vx >= 0 && p.d_vy >= 0 && p.d_vz >= 0);
}

// ============================================================================
// Commit Scenarios
// ============================================================================

#[test]
fn test_cancel_keeps_pre_session_value() {
    let initial = ParameterRecord {
        d_vx: 300,
        ..ParameterRecord::default()
    };
    let mut session = EditSession::open(
        initial,
        ConstraintTable::default(),
        RecordingForm::default(),
        RecordingOwner::default(),
    );

    session.report_field_edit(Field::DVx, FieldEdit::Entry(50.0));
    assert_eq!(session.report_action(Action::Cancel), CommitState::Cancelled);

    assert_eq!(session.model().committed().d_vx, 300);
    assert_eq!(session.model().pending(), session.model().committed());
    assert!(session.owner().received.is_empty());
}

#[test]
fn test_apply_then_ok_notifies_twice() {
    let mut session = open_default();
    session.report_field_edit(Field::RotationZ, FieldEdit::Entry(50.0));
    session.report_action(Action::Apply);
    session.report_field_edit(Field::RotationZ, FieldEdit::Entry(80.0));
    session.report_action(Action::Ok);

    assert_eq!(session.state(), CommitState::Committed);
    let received = &session.owner().received;
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].rotation_z, 50.0);
    assert_eq!(received[1].rotation_z, 80.0);
    assert_eq!(session.form().close_requests, 1);
}

#[test]
fn test_commit_publishes_exactly_the_committed_record() {
    let mut session = open_default();
    session.report_field_edit(Field::Depth, FieldEdit::Entry(2_000.0));
    session.report_field_edit(Field::DVz, FieldEdit::Step(4));
    session.report_action(Action::Apply);

    let model = session.model();
    assert_eq!(model.committed(), model.pending());
    assert_eq!(session.owner().received, vec![*model.committed()]);
    assert_eq!(model.committed().d_vz, 100);
    assert!(!model.is_dirty());
}

#[test]
fn test_apply_without_edits_still_notifies() {
    let mut session = open_default();
    session.report_action(Action::Apply);
    session.report_action(Action::Apply);
    assert_eq!(session.owner().received.len(), 2);
    assert!(session.is_open());
}

#[test]
fn test_terminal_state_ignores_everything() {
    let mut session = open_default();
    session.report_action(Action::Cancel);

    session.report_field_edit(Field::Nu, FieldEdit::Entry(0.3));
    session.report_action(Action::Apply);
    session.report_action(Action::Ok);

    assert_eq!(session.state(), CommitState::Cancelled);
    assert!(session.owner().received.is_empty());
    assert_eq!(session.model().pending().nu, 0.0);
    assert_eq!(session.form().close_requests, 1);
}

#[test]
fn test_display_values_are_typed() {
    let mut session = open_default();
    session.report_field_edit(Field::Northing, FieldEdit::Entry(1_234.6));
    session.report_field_edit(Field::RotationY, FieldEdit::Entry(1_234.6));

    assert_eq!(session.form().last(Field::Northing), Some(FieldValue::Int(1_235)));
    match session.form().last(Field::RotationY) {
        Some(FieldValue::Float(v)) => assert!((v - 154.6).abs() < 1e-9),
        other => panic!("unexpected {:?}", other),
    }
}
