use mcbw::{runner, BenchConfig, DeviceRoster, Error, Role, SessionPlanner};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn roster() -> DeviceRoster {
    DeviceRoster::parse("d0,d1", "0,0").unwrap()
}

#[test]
fn test_parse_inputs() {
    let hostfile = write_file("10.0.0.1\n10.0.0.2\n\n");
    let mcconfig = write_file("# src dst weight\n0 2 1\n1 3 1\n2 1 1\n");

    let planner = SessionPlanner::parse_inputs(mcconfig.path(), hostfile.path(), roster()).unwrap();
    assert_eq!(planner.hosts().len(), 2);
    assert_eq!(planner.sessions().len(), 3);

    let client = planner.plan_for_host("10.0.0.1", 15000).unwrap();
    let roles: Vec<_> = client.iter().map(|l| (l.index, l.role, l.port)).collect();
    assert_eq!(
        roles,
        vec![
            (0, Role::Client, 15000),
            (1, Role::Client, 15001),
            (2, Role::Server, 15002)
        ]
    );
    assert_eq!(client[2].device, "d1");
    assert_eq!(client[0].remote.as_deref(), Some("10.0.0.2"));
}

#[test]
fn test_parse_inputs_errors() {
    let hostfile = write_file("10.0.0.1\n10.0.0.2\n");

    let mcconfig = write_file("0 0 1\n");
    let err = SessionPlanner::parse_inputs(mcconfig.path(), hostfile.path(), roster()).unwrap_err();
    assert!(matches!(err, Error::TopologyError(_)));

    let mcconfig = write_file("0 2 1\n5 1 1\n");
    let err = SessionPlanner::parse_inputs(mcconfig.path(), hostfile.path(), roster()).unwrap_err();
    assert!(matches!(err, Error::RangeError { line: 2, .. }));

    let mcconfig = write_file("0 2\n");
    let err = SessionPlanner::parse_inputs(mcconfig.path(), hostfile.path(), roster()).unwrap_err();
    assert!(matches!(err, Error::ParseError { line: 1, .. }));

    let err = SessionPlanner::parse_inputs("/nonexistent/mcconfig", hostfile.path(), roster())
        .unwrap_err();
    assert!(matches!(err, Error::IoError { .. }));
}

#[test]
fn test_write_args_file() {
    let hostfile = write_file("10.0.0.1\n10.0.0.2\n");
    let mcconfig = write_file("0 2 1\n");
    let planner = SessionPlanner::parse_inputs(mcconfig.path(), hostfile.path(), roster()).unwrap();
    let config = BenchConfig {
        log_prefix: "./bw_send_test".into(),
        ..Default::default()
    };

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("test.args");
    let count = runner::write_args_file(&output, &planner, &config).unwrap();

    let expected = "\
-s\n8192\n-q\n1\n-r\n512\n-t\n128\n-c\nSRD\n-n\n20000\n-N\n--out_json\n\
--out_json_file=./bw_send_test_send_only_sess0_s0_r2_cli.json\n\
-d\nd0\n-p\n15000\n-x\n0\n10.0.0.2\n:\n\n\
-s\n8192\n-q\n1\n-r\n512\n-t\n128\n-c\nSRD\n-n\n20000\n-N\n--out_json\n\
--out_json_file=./bw_send_test_send_only_sess0_s0_r2_ser.json\n\
-d\nd0\n-p\n15000\n-x\n0\n:\n\n";
    assert_eq!(std::fs::read_to_string(&output).unwrap(), expected);
    assert_eq!(count, 47);
}

#[test]
fn test_point_to_point() {
    let mcconfig = write_file("0 2 1\n3 1 1\n");

    let (planner, node) =
        runner::point_to_point(mcconfig.path(), "192.168.0.2", Role::Client, roster()).unwrap();
    assert_eq!(node, 0);
    let plan = planner.plan_for_node(node, 15000).unwrap();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].role, Role::Client);
    assert_eq!(plan[0].remote.as_deref(), Some("192.168.0.2"));
    assert_eq!(plan[1].role, Role::Server);
    assert_eq!(plan[1].device, "d1");

    let (planner, node) =
        runner::point_to_point(mcconfig.path(), "192.168.0.1", Role::Server, roster()).unwrap();
    assert_eq!(node, 1);
    let plan = planner.plan_for_node(node, 15000).unwrap();
    assert_eq!(plan[0].role, Role::Server);
    assert_eq!(plan[1].role, Role::Client);
    assert_eq!(plan[1].remote.as_deref(), Some("192.168.0.1"));

    let mcconfig = write_file("0 4 1\n");
    let err = runner::point_to_point(mcconfig.path(), "192.168.0.2", Role::Client, roster())
        .unwrap_err();
    assert!(matches!(err, Error::RangeError { .. }));
}
