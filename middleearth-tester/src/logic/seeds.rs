use anyhow::{Context, Result, bail};

/// Resolve the `--seeds` list into concrete campaign seeds.
///
/// Entries are comma-separated and may be padded with spaces. Each is a
/// literal integer (negative values use their magnitude) or a range written
/// `start..=end` or `start..end`. Repeats keep their first position.
pub fn parse_seed_list(list: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some((start, end)) = parse_range(token)? {
            seeds.extend(start..end);
            continue;
        }
        if let Ok(value) = token.parse::<i64>() {
            seeds.push(value.unsigned_abs());
            continue;
        }
        let value = token
            .parse::<u64>()
            .with_context(|| format!("invalid seed '{token}'"))?;
        seeds.push(value);
    }

    let mut unique = Vec::with_capacity(seeds.len());
    for seed in seeds {
        if !unique.contains(&seed) {
            unique.push(seed);
        }
    }
    if unique.is_empty() {
        bail!("no seeds provided");
    }
    Ok(unique)
}

/// Half-open bounds for a range token, or `None` when the token is not a range.
fn parse_range(token: &str) -> Result<Option<(u64, u64)>> {
    let (start, end, inclusive) = if let Some((start, end)) = token.split_once("..=") {
        (start, end, true)
    } else if let Some((start, end)) = token.split_once("..") {
        (start, end, false)
    } else {
        return Ok(None);
    };
    let start: u64 = start
        .trim()
        .parse()
        .with_context(|| format!("invalid range start in '{token}'"))?;
    let mut end: u64 = end
        .trim()
        .parse()
        .with_context(|| format!("invalid range end in '{token}'"))?;
    if inclusive {
        end = end.saturating_add(1);
    }
    if end <= start {
        bail!("empty seed range '{token}'");
    }
    Ok(Some((start, end)))
}
