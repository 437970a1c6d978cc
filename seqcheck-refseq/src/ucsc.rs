//! Client for the UCSC DAS server.
//!
//! One blocking GET per range, no retries:
//!
//! `http://genome.ucsc.edu/cgi-bin/das/hg19/dna?segment=15:48762864,48762904`
//!
//! The answer is a DASDNA XML document whose `<DNA>` element holds the
//! bases, lower-cased and wrapped over several lines.

use seqcheck_core::GenomicRange;
use seqcheck_core::consts::DEFAULT_DAS_URL;

use crate::error::{ReferenceError, Result};
use crate::genome::GenomeVersion;
use crate::source::ReferenceSource;

#[derive(Debug, Clone)]
pub struct UcscDasClient {
    base_url: String,
    genome: GenomeVersion,
}

impl UcscDasClient {
    pub fn new(genome: GenomeVersion) -> Self {
        UcscDasClient {
            base_url: DEFAULT_DAS_URL.to_string(),
            genome,
        }
    }

    /// Point the client at another DAS server (mirror or test double).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn genome(&self) -> GenomeVersion {
        self.genome
    }

    /// URL of the `dna` command for `range`.
    pub fn segment_url(&self, range: &GenomicRange) -> String {
        format!(
            "{}/{}/dna?segment={}",
            self.base_url,
            self.genome,
            range.as_string()
        )
    }
}

///
/// Pull the bases out of a DASDNA response body.
///
/// Returns `None` when there is no `<DNA>` element or it holds no bases.
///
pub fn parse_das_dna(body: &str) -> Option<String> {
    let open = body.find("<DNA")?;
    let content_start = open + body[open..].find('>')? + 1;
    let content_end = content_start + body[content_start..].find("</DNA>")?;

    let seq: String = body[content_start..content_end]
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();

    if seq.is_empty() { None } else { Some(seq) }
}

#[cfg(feature = "http")]
impl ReferenceSource for UcscDasClient {
    fn fetch(&self, range: &GenomicRange) -> Result<String> {
        let url = self.segment_url(range);
        log::info!("Fetching {} from {}", range, url);

        let response = match ureq::get(&url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => {
                return Err(ReferenceError::Http {
                    url,
                    reason: format!("HTTP status {}", code),
                });
            }
            Err(e) => {
                return Err(ReferenceError::Http {
                    url,
                    reason: e.to_string(),
                });
            }
        };

        let body = response.into_string()?;

        parse_das_dna(&body).ok_or_else(|| ReferenceError::NoSequenceFound(range.as_string()))
    }

    fn describe(&self) -> String {
        format!("UCSC DAS ({}) at {}", self.genome, self.base_url)
    }
}

#[cfg(not(feature = "http"))]
impl ReferenceSource for UcscDasClient {
    fn fetch(&self, range: &GenomicRange) -> Result<String> {
        Err(ReferenceError::HttpFeatureDisabled(self.segment_url(range)))
    }

    fn describe(&self) -> String {
        format!("UCSC DAS ({}) at {} [http disabled]", self.genome, self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn das_response() -> &'static str {
        r#"<?xml version="1.0" standalone="no"?>
<!DOCTYPE DASDNA SYSTEM "http://www.biodas.org/dtd/dasdna.dtd">
<DASDNA>
<SEQUENCE id="15" start="48762864" stop="48762904" version="1.00">
<DNA length="41">
agcctatctcacactcacagcggaacaggccagggaggttg
</DNA>
</SEQUENCE>
</DASDNA>
"#
    }

    #[rstest]
    fn test_segment_url() {
        let client = UcscDasClient::new(GenomeVersion::Hg19);
        let range = GenomicRange::new("chr15", 48762864, 48762904).unwrap();
        assert_eq!(
            client.segment_url(&range),
            "http://genome.ucsc.edu/cgi-bin/das/hg19/dna?segment=15:48762864,48762904"
        );
    }

    #[rstest]
    fn test_custom_base_url() {
        let client =
            UcscDasClient::new(GenomeVersion::Hg38).with_base_url("http://localhost:8080/das/");
        let range = GenomicRange::new("1", 10, 20).unwrap();
        assert_eq!(
            client.segment_url(&range),
            "http://localhost:8080/das/hg38/dna?segment=1:10,20"
        );
    }

    #[rstest]
    fn test_parse_das_dna(das_response: &str) {
        assert_eq!(
            parse_das_dna(das_response).unwrap(),
            "agcctatctcacactcacagcggaacaggccagggaggttg"
        );
    }

    #[rstest]
    fn test_parse_multiline_dna() {
        let body = "<DNA length=\"8\">\nacgt\nttga\n</DNA>";
        assert_eq!(parse_das_dna(body).unwrap(), "acgtttga");
    }

    #[rstest]
    #[case("<DASDNA></DASDNA>")]
    #[case("<DNA length=\"0\">\n</DNA>")]
    #[case("")]
    fn test_parse_without_sequence(#[case] body: &str) {
        assert_eq!(parse_das_dna(body), None);
    }

    #[rstest]
    #[ignore = "Avoid UCSC dependency in CI"]
    fn test_fetch_from_ucsc() {
        let client = UcscDasClient::new(GenomeVersion::Hg19);
        let range = GenomicRange::new("15", 48762864, 48762904).unwrap();
        assert_eq!(
            client.fetch(&range).unwrap(),
            "agcctatctcacactcacagcggaacaggccagggaggttg"
        );
    }
}
