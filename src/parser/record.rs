//! The canonical typed representation of one ALB access-log line.

use super::tokenizer::tokenize;
use serde::Serialize;
use thiserror::Error;

/// Number of fields in a well-formed access-log line.
pub const EXPECTED_FIELDS: usize = 24;

/// Sentinel for a numeric field whose source token failed to parse.
pub const NUMERIC_SENTINEL: i64 = -1;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("expected {EXPECTED_FIELDS} fields, found {found} in line '{line}'")]
    FieldCount { found: usize, line: String },
}

/// One parsed access-log entry.
///
/// Numeric fields hold either a successfully parsed value or `-1`; each field
/// fails independently and a failure never aborts the rest of the line.
/// String fields carry the raw token verbatim (quotes already stripped by the
/// tokenizer). Serialized field names are the stable downstream schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbLogRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    pub elb: String,
    pub client: String,
    pub client_port: i64,
    pub target: String,
    pub target_port: i64,
    pub request_processing_time: f64,
    pub target_processing_time: f64,
    pub response_processing_time: f64,
    pub elb_status_code: i64,
    pub target_status_code: i64,
    pub received_bytes: i64,
    pub sent_bytes: i64,
    pub request: String,
    pub user_agent: String,
    pub ssl_cipher: String,
    pub ssl_protocol: String,
    pub target_group_arn: String,
    pub trace_id: String,
    pub domain_name: String,
    pub chosen_cert_arn: String,
    pub matched_rule_priority: String,
    pub request_creation_time: String,
    pub actions_executed: String,
    pub redirect_url: String,
}

impl AlbLogRecord {
    /// Parses one raw line. Fails only when the line does not carry the full
    /// fixed-position schema; every field-level problem degrades to a
    /// sentinel or a verbatim string instead.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\n', '\r']);
        let tokens = tokenize(line);
        if tokens.len() < EXPECTED_FIELDS {
            return Err(ParseError::FieldCount {
                found: tokens.len(),
                line: line.to_string(),
            });
        }

        let (client, client_port) = split_host_port(&tokens[3]);
        let (target, target_port) = split_host_port(&tokens[4]);

        Ok(Self {
            kind: tokens[0].clone(),
            timestamp: tokens[1].clone(),
            elb: tokens[2].clone(),
            client,
            client_port,
            target,
            target_port,
            request_processing_time: float_or_sentinel(&tokens[5]),
            target_processing_time: float_or_sentinel(&tokens[6]),
            response_processing_time: float_or_sentinel(&tokens[7]),
            elb_status_code: int_or_sentinel(&tokens[8]),
            target_status_code: int_or_sentinel(&tokens[9]),
            received_bytes: int_or_sentinel(&tokens[10]),
            sent_bytes: int_or_sentinel(&tokens[11]),
            request: tokens[12].clone(),
            user_agent: tokens[13].clone(),
            ssl_cipher: tokens[14].clone(),
            ssl_protocol: tokens[15].clone(),
            target_group_arn: tokens[16].clone(),
            trace_id: tokens[17].clone(),
            domain_name: tokens[18].clone(),
            chosen_cert_arn: tokens[19].clone(),
            matched_rule_priority: tokens[20].clone(),
            request_creation_time: tokens[21].clone(),
            actions_executed: tokens[22].clone(),
            redirect_url: tokens[23].clone(),
        })
    }
}

/// Splits an `address:port` token on the last colon. A missing colon or an
/// unparseable port keeps the address segment and yields the port sentinel;
/// a token with no colon is kept whole as the address.
fn split_host_port(token: &str) -> (String, i64) {
    match token.rsplit_once(':') {
        Some((host, port)) => {
            let port = port.parse().unwrap_or_else(|_| {
                tracing::debug!(token, "unparseable port, using sentinel");
                NUMERIC_SENTINEL
            });
            (host.to_string(), port)
        }
        None => (token.to_string(), NUMERIC_SENTINEL),
    }
}

fn int_or_sentinel(token: &str) -> i64 {
    token.parse().unwrap_or_else(|_| {
        tracing::debug!(token, "unparseable integer field, using sentinel");
        NUMERIC_SENTINEL
    })
}

fn float_or_sentinel(token: &str) -> f64 {
    token.parse().unwrap_or_else(|_| {
        tracing::debug!(token, "unparseable float field, using sentinel");
        -1.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"http 2018-09-18T21:38:37.519183Z app/test1/7f050ffab5373730 95.90.211.80:4254 172.31.7.183:80 0.001 0.000 0.000 200 200 461 654 "GET http://test1.example.com:80/ HTTP/1.1" "Mozilla/5.0" - - arn:aws:elasticloadbalancing:eu-west-1:123:targetgroup/tg/76784 "Root=1-5ba1705d-abc" "-" "-" 0 2018-09-18T21:38:37.518000Z "forward" "-""#;

    #[test]
    fn parses_well_formed_line() {
        let record = AlbLogRecord::parse(SAMPLE).unwrap();
        assert_eq!(record.kind, "http");
        assert_eq!(record.timestamp, "2018-09-18T21:38:37.519183Z");
        assert_eq!(record.elb, "app/test1/7f050ffab5373730");
        assert_eq!(record.client, "95.90.211.80");
        assert_eq!(record.client_port, 4254);
        assert_eq!(record.target, "172.31.7.183");
        assert_eq!(record.target_port, 80);
        assert_eq!(record.request, "GET http://test1.example.com:80/ HTTP/1.1");
        assert_eq!(record.user_agent, "Mozilla/5.0");
        assert_eq!(record.elb_status_code, 200);
        assert_eq!(record.received_bytes, 461);
        assert_eq!(record.sent_bytes, 654);
        assert_eq!(record.trace_id, "Root=1-5ba1705d-abc");
        assert_eq!(record.actions_executed, "forward");
        assert_eq!(record.redirect_url, "-");
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = AlbLogRecord::parse(SAMPLE).unwrap();
        let second = AlbLogRecord::parse(SAMPLE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_line_is_rejected() {
        let err = AlbLogRecord::parse("http 2018-09-18T21:38:37.519183Z elb1").unwrap_err();
        let ParseError::FieldCount { found, line } = err;
        assert_eq!(found, 3);
        assert!(line.contains("elb1"));
    }

    #[test]
    fn numeric_failures_are_independent_sentinels() {
        let line = SAMPLE
            .replace(" 0.001 0.000 0.000 200 200 461 654 ", " x y z a b c d ");
        let record = AlbLogRecord::parse(&line).unwrap();
        assert_eq!(record.request_processing_time, -1.0);
        assert_eq!(record.target_processing_time, -1.0);
        assert_eq!(record.response_processing_time, -1.0);
        assert_eq!(record.elb_status_code, NUMERIC_SENTINEL);
        assert_eq!(record.target_status_code, NUMERIC_SENTINEL);
        assert_eq!(record.received_bytes, NUMERIC_SENTINEL);
        assert_eq!(record.sent_bytes, NUMERIC_SENTINEL);
        // Sibling fields are unaffected by the numeric failures.
        assert_eq!(record.kind, "http");
        assert_eq!(record.client, "95.90.211.80");
        assert_eq!(record.request, "GET http://test1.example.com:80/ HTTP/1.1");
    }

    // Open question from the observed implementations: on a port parse
    // failure we keep the address portion (not the whole token) and sentinel
    // the port.
    #[test]
    fn host_port_split_keeps_address_on_bad_port() {
        assert_eq!(split_host_port("95.90.211.80:4254"), ("95.90.211.80".to_string(), 4254));
        assert_eq!(split_host_port("95.90.211.80:x"), ("95.90.211.80".to_string(), -1));
        assert_eq!(split_host_port("-"), ("-".to_string(), -1));
    }

    #[test]
    fn ipv6_host_port_splits_on_last_colon() {
        assert_eq!(split_host_port("2001:db8::1:443"), ("2001:db8::1".to_string(), 443));
    }

    #[test]
    fn serialized_field_names_are_stable() {
        let record = AlbLogRecord::parse(SAMPLE).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "http");
        assert_eq!(value["@timestamp"], "2018-09-18T21:38:37.519183Z");
        assert_eq!(value["client"], "95.90.211.80");
        assert_eq!(value["client_port"], 4254);
        assert_eq!(value["elb_status_code"], 200);
        assert_eq!(value["user_agent"], "Mozilla/5.0");
        assert!(value.get("kind").is_none());
    }
}
