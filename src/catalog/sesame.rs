/// CDS Sesame name resolver
///
/// Queries `nph-sesame/-oI/SNV?<name>` (plain text, all databases) and
/// reads the J2000 position from the first `%J` line of the answer.
use url::Url;

use super::NameResolver;
use crate::coordinates::SkyPosition;
use crate::error::ResolutionError;
use crate::utils::http::http_agent;

/// Sesame client trying each mirror in turn
pub struct SesameResolver {
    mirrors: Vec<String>,
    agent: ureq::Agent,
}

impl SesameResolver {
    pub fn new(mirrors: Vec<String>) -> Self {
        SesameResolver {
            mirrors,
            agent: http_agent(),
        }
    }

    fn query(&self, mirror: &str, name: &str) -> Result<String, ResolutionError> {
        let url = sesame_url(mirror, name)?;
        log::debug!("Sesame URL: {url}");

        let response = self
            .agent
            .get(url.as_str())
            .call()
            .map_err(|e| ResolutionError::Service(format!("{mirror}: request failed: {e}")))?;

        response
            .into_body()
            .read_to_string()
            .map_err(|e| ResolutionError::Service(format!("{mirror}: failed to read response: {e}")))
    }
}

impl NameResolver for SesameResolver {
    fn resolve(&self, name: &str) -> Result<SkyPosition, ResolutionError> {
        let mut last_error = None;

        for mirror in &self.mirrors {
            match self.query(mirror, name) {
                Ok(body) => {
                    return parse_sesame_response(&body)
                        .ok_or_else(|| ResolutionError::UnknownTarget(name.to_string()));
                }
                Err(e) => {
                    log::warn!("Sesame mirror unavailable: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ResolutionError::Service("no Sesame mirrors configured".to_string())))
    }

    fn name(&self) -> String {
        "Sesame".to_string()
    }
}

fn sesame_url(mirror: &str, name: &str) -> Result<Url, ResolutionError> {
    let base = if mirror.ends_with('/') {
        mirror.to_string()
    } else {
        format!("{mirror}/")
    };
    let mut url = Url::parse(&base)
        .and_then(|u| u.join("-oI/SNV"))
        .map_err(|e| ResolutionError::Service(format!("invalid Sesame URL {mirror}: {e}")))?;
    // Sesame reads the raw query string as the name; '+' would become a space
    url.set_query(Some(&name.trim().replace('+', "%2B")));
    Ok(url)
}

/// Position from the first `%J <ra> <dec>` line, if any
pub fn parse_sesame_response(body: &str) -> Option<SkyPosition> {
    body.lines()
        .filter_map(|line| line.trim_start().strip_prefix("%J "))
        .find_map(|rest| {
            let mut fields = rest.split_whitespace();
            let ra_deg = fields.next()?.parse::<f64>().ok()?;
            let dec_deg = fields.next()?.parse::<f64>().ok()?;
            Some(SkyPosition::new(ra_deg, dec_deg))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BETA_PIC: &str = "# bet Pic\t#Q1234567
#=S=Simbad (via url):    1
%@ 1234567
%I.0 * bet Pic
%C.0 BY*
%J 086.82119870 -51.06651143 = 05:47:17.08 -51:03:59.4
%J.E [0.1173 0.1484 90] A 2007A&A...474..653V
%P -4.03 +82.00 [0.01 0.01 0] A 2020yCat.1350....0G
%I HD 39060
#====Done (2024-Jan-10,10:00:00z)====
";

    const UNKNOWN: &str = "# Not A Star 42\t#
#! *** Nothing found ***
#====Done (2024-Jan-10,10:00:00z)====
";

    #[test]
    fn test_parse_first_j_line() {
        let position = parse_sesame_response(BETA_PIC).unwrap();
        assert!((position.ra_deg - 86.8211987).abs() < 1e-9);
        assert!((position.dec_deg + 51.06651143).abs() < 1e-9);
    }

    #[test]
    fn test_parse_nothing_found() {
        assert!(parse_sesame_response(UNKNOWN).is_none());
        assert!(parse_sesame_response("").is_none());
    }

    #[test]
    fn test_url_building() {
        let url = sesame_url("https://cds.unistra.fr/cgi-bin/nph-sesame", "HD 209458").unwrap();
        assert_eq!(url.path(), "/cgi-bin/nph-sesame/-oI/SNV");
        assert_eq!(url.query(), Some("HD%20209458"));

        let url = sesame_url("https://cds.unistra.fr/cgi-bin/nph-sesame/", "BD+20 307").unwrap();
        assert!(url.as_str().ends_with("-oI/SNV?BD%2B20%20307"));
    }

    #[test]
    fn test_no_mirrors() {
        let resolver = SesameResolver::new(Vec::new());
        assert!(matches!(
            resolver.resolve("WASP-12"),
            Err(ResolutionError::Service(_))
        ));
    }

    #[test]
    #[ignore] // Requires network access
    fn test_resolve_live() {
        let settings = crate::utils::config::Settings::default();
        let resolver = SesameResolver::new(settings.sesame_urls);
        let position = resolver.resolve("55 Cnc").unwrap();
        assert!((position.ra_deg - 133.149).abs() < 0.01);
        assert!((position.dec_deg - 28.331).abs() < 0.01);
    }
}
