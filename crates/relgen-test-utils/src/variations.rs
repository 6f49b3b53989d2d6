//! Sample variation matrices

/// Two repos with a global `pump` default.
///
/// `repo0` has branches `br0` and `br1`; `br0/tr0` has testsuites `ts0` and
/// `ts1`. `repo1` has one branch with triggers `tr0` and `tr1`.
pub const SAMPLE_VARIATIONS: &str = r#"
pump: [tyk-pump]
level:
  repo0:
    distros:
      deb: [ubuntu:jammy]
    level:
      br0:
        envfiles:
          - {cache: redis7, db: mongo7, config: sha256, apimarkers: "not plugin", uimarkers: ""}
        level:
          tr0:
            sink: [tyk-sink]
            level:
              ts0:
                pump: [tyk-pump, $LATEST]
              ts1:
                envfiles:
                  - {cache: redis6, db: postgres15, config: murmur64, apimarkers: "", uimarkers: ""}
      br1:
        level:
          tr0:
            level:
              ts0: {}
  repo1:
    level:
      br0:
        level:
          tr0:
            level:
              ts0: {}
              ts1: {}
          tr1:
            level:
              ts1: {}
              ts0: {}
"#;

/// The matrix from the pump inheritance example: `a`, `b`, `c` declared on
/// branch, trigger and testsuite respectively.
pub const CHAIN_VARIATIONS: &str = r#"
level:
  repo:
    level:
      br0:
        pump: [a]
        level:
          tr0:
            pump: [b, a]
            level:
              ts0:
                pump: [c]
"#;

/// `repo/br0/tr0/ts0` has a fourth level below it; `br1` is well formed.
pub const DEEP_VARIATIONS: &str = r#"
level:
  repo:
    level:
      br0:
        level:
          tr0:
            level:
              ts0:
                pump: [deep]
                level:
                  extra:
                    pump: [too-deep]
              ts1: {}
      br1:
        level:
          tr0:
            level:
              ts0:
                sink: [ok]
"#;
