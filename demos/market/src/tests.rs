//! Argument parsing tests for the market binary.

#[cfg(test)]
mod args_tests {
    use clap::Parser;
    use clap::error::ErrorKind;
    use fm_core::IdlePolicy;
    use fm_experiment::ExperimentConfig;

    use crate::Args;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("market").chain(argv.iter().copied()))
    }

    #[test]
    fn name_without_config_dir_rejected() {
        let err = parse(&["--name", "dense"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn config_dir_without_name_rejected() {
        let err = parse(&["--config-dir", "configs"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn config_and_config_dir_conflict() {
        let err = parse(&["--config", "a.json", "--config-dir", "configs", "--name", "a"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn repeated_names_collected() {
        let args = parse(&["--config-dir", "configs", "--name", "dense", "--name", "sparse"]).unwrap();
        assert_eq!(args.name, vec!["dense", "sparse"]);
        assert_eq!(args.out.to_str(), Some("output"));
    }

    #[test]
    fn overrides_applied() {
        let args = parse(&["--ticks", "12", "--seed", "7", "--walk", "2"]).unwrap();
        let mut cfg = ExperimentConfig::new("default");
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg.market.total_ticks, 12);
        assert_eq!(cfg.market.seed, 7);
        assert_eq!(cfg.market.idle_policy, IdlePolicy::RandomWalk { step: 2 });
    }

    #[test]
    fn no_overrides_keeps_config() {
        let args = parse(&[]).unwrap();
        let mut cfg = ExperimentConfig::new("default");
        args.apply_overrides(&mut cfg);
        assert_eq!(cfg, ExperimentConfig::new("default"));
    }
}
