//! Update-check output parsers

use crate::helpers::OutdatedPackage;
use regex::Regex;
use std::sync::OnceLock;

/// Parse `yum -q check-update` output.
///
/// Lines look like `nginx.x86_64  1:1.20.1-14.el9  appstream`; the arch
/// suffix after the last dot is stripped from the package name.
pub fn parse_yum_checkupdates(output: &str) -> Vec<OutdatedPackage> {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    let re = LINE_RE
        .get_or_init(|| Regex::new(r"^(\S+)\.(\S+)\s+(\S+)\s+(\S+)\s*$").unwrap());

    output
        .lines()
        .filter_map(|line| {
            re.captures(line).map(|cap| OutdatedPackage {
                package: cap[1].to_string(),
                version: cap[3].to_string(),
                repo: cap[4].to_string(),
            })
        })
        .collect()
}

/// Parse `apt-get --simulate upgrade` output.
///
/// Update lines look like
/// `Inst base-files [7.2ubuntu5.4] (7.2ubuntu5.5 Ubuntu:14.04/trusty-updates [amd64])`;
/// the version reported is the upgrade candidate. The current-version
/// bracket is absent for new dependencies pulled in by the upgrade.
pub fn parse_apt_checkupdates(output: &str) -> Vec<OutdatedPackage> {
    static INST_RE: OnceLock<Regex> = OnceLock::new();
    let re = INST_RE.get_or_init(|| {
        Regex::new(r"^Inst\s+(\S+)\s+(?:\[[^\]]*\]\s+)?\((\S+)\s+(.+?)\s*\[").unwrap()
    });

    output
        .lines()
        .filter_map(|line| {
            re.captures(line).map(|cap| OutdatedPackage {
                package: cap[1].to_string(),
                version: cap[2].to_string(),
                repo: cap[3].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yum_check_update_lines() {
        let output = "\
nginx.x86_64                     1:1.20.1-14.el9                  appstream
openssl-libs.x86_64              1:3.0.7-25.el9                   baseos
";

        let outdated = parse_yum_checkupdates(output);
        assert_eq!(outdated.len(), 2);
        assert_eq!(
            outdated[0],
            OutdatedPackage {
                package: "nginx".to_string(),
                version: "1:1.20.1-14.el9".to_string(),
                repo: "appstream".to_string(),
            }
        );
    }

    #[test]
    fn yum_parser_splits_dotted_names_at_the_arch_suffix() {
        let output = "java-1.8.0-openjdk.x86_64   1:1.8.0.402-1.el9   appstream\n";

        let outdated = parse_yum_checkupdates(output);
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].package, "java-1.8.0-openjdk");
        assert_eq!(outdated[0].version, "1:1.8.0.402-1.el9");
    }

    #[test]
    fn yum_parser_skips_non_package_lines() {
        let output = "\
Obsoleting Packages

nginx.x86_64   1:1.20.1-14.el9   appstream
";

        let outdated = parse_yum_checkupdates(output);
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].package, "nginx");
    }

    #[test]
    fn parses_apt_inst_lines() {
        let output = "\
Reading package lists...
Inst base-files [7.2ubuntu5.4] (7.2ubuntu5.5 Ubuntu:14.04/trusty-updates [amd64])
Inst libssl1.1 [1.1.1f-1ubuntu2.19] (1.1.1f-1ubuntu2.20 Ubuntu:20.04/focal-updates [amd64])
Conf base-files (7.2ubuntu5.5 Ubuntu:14.04/trusty-updates [amd64])
";

        let outdated = parse_apt_checkupdates(output);
        assert_eq!(outdated.len(), 2);
        assert_eq!(
            outdated[0],
            OutdatedPackage {
                package: "base-files".to_string(),
                version: "7.2ubuntu5.5".to_string(),
                repo: "Ubuntu:14.04/trusty-updates".to_string(),
            }
        );
    }

    #[test]
    fn apt_parser_accepts_missing_current_version() {
        let output = "Inst libnew (2.0 Debian:12/bookworm [amd64])\n";

        let outdated = parse_apt_checkupdates(output);
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].package, "libnew");
        assert_eq!(outdated[0].version, "2.0");
        assert_eq!(outdated[0].repo, "Debian:12/bookworm");
    }
}
