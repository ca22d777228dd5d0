use crate::{BenchConfig, LocalSession, Role, Session, CONNECTION_TYPE, DEFAULT_QP, PACKET_SIZE};

/// Name of the JSON result file for one end of a session.
///
/// Downstream tooling keys on these names, so the layout is fixed:
/// `<prefix>[_bi|_send_only]_sess<i>_s<src>_r<dst>[_td<tx>rd<rx>][_qp<n>]_<cli|ser>.json`.
pub fn out_json_name(config: &BenchConfig, index: usize, session: &Session, role: Role) -> String {
    let mut name = config.log_prefix.clone();
    name += if config.bidirectional { "_bi" } else { "_send_only" };
    name += &format!("_sess{index}_s{}_r{}", session.src, session.dst);
    if !config.has_default_depths() {
        name += &format!("_td{}rd{}", config.tx_depth, config.rx_depth);
    }
    if config.qp != DEFAULT_QP {
        name += &format!("_qp{}", config.qp);
    }
    name += &format!("_{}.json", role.suffix());
    name
}

/// `ib_send_bw` tokens for one local session, terminated by `:`.
pub fn build_argument_vector(local: &LocalSession, config: &BenchConfig) -> Vec<String> {
    let out_json = out_json_name(config, local.index, &local.session, local.role);
    let mut args: Vec<String> = vec![
        "-s".into(),
        PACKET_SIZE.to_string(),
        "-q".into(),
        config.qp.to_string(),
        "-r".into(),
        config.rx_depth.to_string(),
        "-t".into(),
        config.tx_depth.to_string(),
        "-c".into(),
        CONNECTION_TYPE.into(),
        "-n".into(),
        config.iters.to_string(),
        "-N".into(),
        "--out_json".into(),
        format!("--out_json_file={out_json}"),
    ];
    if config.bidirectional {
        args.extend(["-b".into(), "--report-both".into()]);
    }
    args.extend([
        "-d".into(),
        local.device.clone(),
        "-p".into(),
        local.port.to_string(),
        "-x".into(),
        local.gid_index.clone(),
    ]);
    if let Some(remote) = &local.remote {
        args.push(remote.clone());
    }
    args.push(":".into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LocalSession {
        LocalSession {
            index: 3,
            session: Session { src: 1, dst: 6 },
            role: Role::Client,
            device: "rdmap32s27".into(),
            gid_index: "0".into(),
            port: 15003,
            remote: Some("10.0.0.2".into()),
        }
    }

    fn config() -> BenchConfig {
        BenchConfig {
            log_prefix: "./bw_send_ring".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_out_json_name() {
        let session = Session { src: 1, dst: 6 };
        let mut config = config();
        assert_eq!(
            out_json_name(&config, 3, &session, Role::Client),
            "./bw_send_ring_send_only_sess3_s1_r6_cli.json"
        );

        config.bidirectional = true;
        config.rx_depth = 1024;
        assert_eq!(
            out_json_name(&config, 3, &session, Role::Server),
            "./bw_send_ring_bi_sess3_s1_r6_td128rd1024_ser.json"
        );

        config.rx_depth = 512;
        config.tx_depth = 64;
        config.qp = 4;
        assert_eq!(
            out_json_name(&config, 0, &session, Role::Client),
            "./bw_send_ring_bi_sess0_s1_r6_td64rd512_qp4_cli.json"
        );
    }

    #[test]
    fn test_client_vector() {
        let args = build_argument_vector(&client(), &config());
        let expected = [
            "-s",
            "8192",
            "-q",
            "1",
            "-r",
            "512",
            "-t",
            "128",
            "-c",
            "SRD",
            "-n",
            "20000",
            "-N",
            "--out_json",
            "--out_json_file=./bw_send_ring_send_only_sess3_s1_r6_cli.json",
            "-d",
            "rdmap32s27",
            "-p",
            "15003",
            "-x",
            "0",
            "10.0.0.2",
            ":",
        ];
        assert_eq!(args, expected);
    }

    #[test]
    fn test_server_bidirectional_vector() {
        let mut local = client();
        local.role = Role::Server;
        local.remote = None;
        let config = BenchConfig {
            bidirectional: true,
            iters: 5000,
            ..config()
        };

        let args = build_argument_vector(&local, &config);
        assert_eq!(args[11], "5000");
        assert_eq!(
            args[14],
            "--out_json_file=./bw_send_ring_bi_sess3_s1_r6_ser.json"
        );
        assert_eq!(&args[15..17], ["-b", "--report-both"]);
        assert_eq!(&args[17..], ["-d", "rdmap32s27", "-p", "15003", "-x", "0", ":"]);
    }
}
