//! JSON in, JSON out, the way the CLI drives the engine.

use serde_json::{json, Value};

use mycoplan::core::{WorkflowRequest, WorkflowTask};
use mycoplan::schedule::{create_schedule_proposal, ScheduleProposal};
use mycoplan::{Config, Error};

const TASKS: &str = r#"[
    {"taskId": "prep", "type": "substrate_prep", "durationHours": 2,
     "laborHours": 2, "species": "oyster", "equipment": ["mixer"]},
    {"taskId": "sterilize", "type": "sterilization", "durationHours": 4,
     "dependsOn": ["prep"], "laborHours": 1, "equipment": ["autoclave"]},
    {"taskId": "inoculate", "type": "inoculation", "durationHours": 1.5,
     "dependsOn": ["sterilize"], "room": "lab", "facility": "north"}
]"#;

const REQUEST: &str = r#"{
    "harvestTargets": [{"species": "oyster", "targetYieldKg": 12.5}],
    "constraintSet": {
        "laborHoursAvailable": 6,
        "equipmentAvailable": ["autoclave"],
        "temperatureMinC": 18
    },
    "timeWindowDays": 1,
    "prioritization": {"minimizeDuration": true}
}"#;

fn inputs() -> (Vec<WorkflowTask>, WorkflowRequest) {
    (
        serde_json::from_str(TASKS).unwrap(),
        serde_json::from_str(REQUEST).unwrap(),
    )
}

#[test]
fn test_input_parses_with_defaults() {
    let (tasks, request) = inputs();

    assert_eq!(tasks.len(), 3);
    assert!(tasks[0].depends_on.is_empty());
    assert_eq!(tasks[2].labor_hours, 0.0);
    assert!(tasks[2].equipment.is_empty());
    assert_eq!(tasks[2].room.as_deref(), Some("lab"));

    assert_eq!(request.total_target_yield_kg(), 12.5);
    assert_eq!(request.constraint_set.temperature_min_c, Some(18.0));
    assert_eq!(request.constraint_set.substrate_limit_kg, None);
    assert!(request.prioritization.minimize_duration);
    assert!(!request.prioritization.maximize_yield);
}

#[test]
fn test_proposal_json_shape() {
    let (tasks, request) = inputs();
    let proposal = create_schedule_proposal(&tasks, &request, "2024-03-10").unwrap();
    let value = serde_json::to_value(&proposal).unwrap();

    for key in [
        "proposalId",
        "createdAt",
        "scheduledTasks",
        "startDate",
        "endDate",
        "totalDays",
        "estimatedYieldKg",
        "totalLaborHours",
        "equipmentUtilization",
        "rationale",
        "confidence",
        "riskFactors",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }

    assert_eq!(value["startDate"], json!("2024-03-10T06:00:00"));
    assert_eq!(value["endDate"], json!("2024-03-10T13:30:00"));
    assert_eq!(value["totalDays"], json!(1));
    assert_eq!(value["totalLaborHours"], json!(3.0));
    assert_eq!(value["equipmentUtilization"], json!({"autoclave": 13}));

    let first = &value["scheduledTasks"][0];
    assert_eq!(first["taskId"], json!("prep"));
    assert_eq!(first["type"], json!("substrate_prep"));
    assert_eq!(first["assignedLabor"], json!(2.0));
    assert_eq!(first["sequenceOrder"], json!(1));
    assert_eq!(first["scheduledStart"], json!("2024-03-10T06:00:00"));
    assert!(first.get("room").is_none());

    let last = &value["scheduledTasks"][2];
    assert_eq!(last["room"], json!("lab"));
    assert_eq!(last["dependsOn"], json!(["sterilize"]));
}

#[test]
fn test_proposal_json_reads_back() {
    let (tasks, request) = inputs();
    let proposal = create_schedule_proposal(&tasks, &request, "2024-03-10").unwrap();

    let text = serde_json::to_string_pretty(&proposal).unwrap();
    let parsed: ScheduleProposal = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed.proposal_id, proposal.proposal_id);
    assert_eq!(parsed.scheduled_tasks, proposal.scheduled_tasks);
}

#[test]
fn test_start_date_forms() {
    let (tasks, request) = inputs();
    for start in ["2024-03-10", "2024-03-10T22:15:00Z", "2024-03-10T09:00:00"] {
        let proposal = create_schedule_proposal(&tasks, &request, start).unwrap();
        let value = serde_json::to_value(&proposal).unwrap();
        assert_eq!(value["startDate"], json!("2024-03-10T06:00:00"), "{}", start);
    }
}

#[test]
fn test_bad_start_date() {
    let (tasks, request) = inputs();
    let err = create_schedule_proposal(&tasks, &request, "next tuesday").unwrap_err();
    assert!(matches!(err, Error::InvalidStartDate(ref s) if s == "next tuesday"));
}

#[test]
fn test_missing_required_field_rejected() {
    let missing: Result<Vec<WorkflowTask>, _> =
        serde_json::from_str(r#"[{"taskId": "a", "type": "check"}]"#);
    assert!(missing.is_err());

    let no_constraints: Result<WorkflowRequest, _> = serde_json::from_str("{}");
    assert!(no_constraints.is_err());
}

#[test]
fn test_config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("mycoplan.toml");

    let config = Config {
        day_start_hour: 5,
        default_room_count: Some(4),
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);

    let value: Value = serde_json::to_value(&loaded).unwrap();
    assert_eq!(value["day_start_hour"], json!(5));
}
