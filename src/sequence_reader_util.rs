use crate::error::Error;
use std::io::Read;

/// Parses `N` followed by `N` integers separated by any whitespace.
/// Tokens after the N-th value are ignored.
pub fn parse_sequence(text: &str) -> Result<Vec<i64>, Error> {
    let mut tokens = text.split_whitespace();
    let count_token = tokens.next().ok_or(Error::MissingCount)?;
    let n: usize = count_token
        .parse()
        .map_err(|_| Error::InvalidCount(count_token.to_string()))?;

    // the count is untrusted, so cap the up-front allocation by what the text could hold
    let mut ret: Vec<i64> = Vec::with_capacity(n.min(text.len() / 2 + 1));
    for index in 0..n {
        let token = match tokens.next() {
            Some(t) => t,
            None => {
                return Err(Error::Truncated {
                    expected: n,
                    found: index,
                })
            }
        };
        let value: i64 = token.parse().map_err(|_| Error::InvalidValue {
            index,
            token: token.to_string(),
        })?;
        ret.push(value);
    }
    Ok(ret)
}

pub fn read_sequence<R: Read>(mut source: R) -> Result<Vec<i64>, Error> {
    let mut text = String::new();
    source.read_to_string(&mut text)?;
    parse_sequence(&text)
}

/// Input file layout: `N`, a newline, then the values separated by single spaces.
pub fn format_sequence(values: &[i64]) -> String {
    let mut ret = format!("{}\n", values.len());
    for (i, value) in values.iter().enumerate() {
        if i != 0 {
            ret.push(' ');
        }
        ret.push_str(&value.to_string());
    }
    ret
}
