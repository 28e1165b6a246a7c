#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use crate::framing::LineFramer;
    use crate::kubernetes::is_owned_by;
    use crate::utils::color_for;
    use clap::Parser;
    use crossterm::style::Color;
    use k8s_openapi::api::batch::v1::{CronJob, Job};
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};

    fn cronjob_with_uid(uid: &str) -> CronJob {
        CronJob {
            metadata: ObjectMeta {
                uid: Some(uid.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn job_with_owner(uid: &str, controller: Option<bool>) -> Job {
        Job {
            metadata: ObjectMeta {
                owner_references: Some(vec![OwnerReference {
                    uid: uid.to_string(),
                    controller,
                    ..Default::default()
                }]),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_parsing_name() {
        let args = vec!["cronjob-tail", "nightly"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.name, "nightly");
        assert!(cli.namespace.is_none());
        assert!(cli.container.is_none());
        assert!(!cli.follow);
        assert!(!cli.timestamps);
    }

    #[test]
    fn test_cli_parsing_all_flags() {
        let args = vec![
            "cronjob-tail",
            "nightly",
            "-n",
            "batch",
            "-c",
            "main",
            "-f",
            "--timestamps",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.name, "nightly");
        assert_eq!(cli.namespace, Some("batch".to_string()));
        assert_eq!(cli.container, Some("main".to_string()));
        assert!(cli.follow);
        assert!(cli.timestamps);
    }

    #[test]
    fn test_cli_parsing_max_streams() {
        let args = vec!["cronjob-tail", "nightly", "--max-streams", "8"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.max_streams, Some(8));
    }

    #[test]
    fn test_cli_requires_name() {
        let args = vec!["cronjob-tail"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_is_owned_by_controller() {
        let cronjob = cronjob_with_uid("abc-123");
        let job = job_with_owner("abc-123", Some(true));
        assert!(is_owned_by(&job, &cronjob));
    }

    #[test]
    fn test_is_owned_by_uid_mismatch() {
        let cronjob = cronjob_with_uid("abc-123");
        let job = job_with_owner("def-456", Some(true));
        assert!(!is_owned_by(&job, &cronjob));
    }

    #[test]
    fn test_is_owned_by_not_controller() {
        let cronjob = cronjob_with_uid("abc-123");
        assert!(!is_owned_by(&job_with_owner("abc-123", Some(false)), &cronjob));
        assert!(!is_owned_by(&job_with_owner("abc-123", None), &cronjob));
    }

    #[test]
    fn test_is_owned_by_no_owner_references() {
        let cronjob = cronjob_with_uid("abc-123");
        let job = Job::default();
        assert!(!is_owned_by(&job, &cronjob));
    }

    #[test]
    fn test_color_for_deterministic() {
        let first = color_for("nightly-28311234-abcde");
        let second = color_for("nightly-28311234-abcde");
        assert_eq!(first, second);
    }

    #[test]
    fn test_color_for_in_palette() {
        let palette = [
            Color::DarkRed,
            Color::DarkGreen,
            Color::DarkYellow,
            Color::DarkBlue,
            Color::DarkMagenta,
            Color::DarkCyan,
        ];
        for name in ["a", "nightly-28311234-abcde", "nightly-28311234-fghij", "ü"] {
            assert!(palette.contains(&color_for(name)));
        }
    }

    #[test]
    fn test_color_for_known_values() {
        // 'a' is 97: 97^2 / 2 + 1 = 4705.5, truncated 4705, 4705 % 6 == 1
        assert_eq!(color_for("a"), Color::DarkGreen);
        // empty name sums to zero, palette index 0
        assert_eq!(color_for(""), Color::DarkRed);
    }

    #[test]
    fn test_framer_reassembles_split_lines() {
        let mut framer = LineFramer::new();
        let mut lines = Vec::new();
        for chunk in [&b"hello wor"[..], b"ld\nfoo\n", b"bar"] {
            lines.extend(framer.push(chunk));
        }
        lines.extend(framer.finish());
        assert_eq!(lines, vec!["hello world", "foo", "bar"]);
    }

    #[test]
    fn test_framer_strips_nul_bytes() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"ab\x00\x00c\n"), vec!["abc"]);
    }

    #[test]
    fn test_framer_suppresses_blank_lines() {
        let mut framer = LineFramer::new();
        assert!(framer.push(b"\x00\x00\n").is_empty());
        assert!(framer.push(b"   \n\n").is_empty());
        assert!(framer.finish().is_none());
    }

    #[test]
    fn test_framer_multiple_lines_in_one_chunk() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.push(b"one\ntwo\nthree\n"), vec!["one", "two", "three"]);
        assert!(framer.finish().is_none());
    }

    #[test]
    fn test_framer_utf8_split_across_chunks() {
        let mut framer = LineFramer::new();
        let bytes = "grüße\n".as_bytes();
        assert!(framer.push(&bytes[..3]).is_empty());
        assert_eq!(framer.push(&bytes[3..]), vec!["grüße"]);
    }
}
