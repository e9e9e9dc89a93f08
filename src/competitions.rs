use anyhow::{Result, anyhow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competition {
    pub code: &'static str,
    pub name: &'static str,
    pub id: u32,
}

pub const COMPETITIONS: [Competition; 10] = [
    Competition {
        code: "PL",
        name: "Premier League",
        id: 2021,
    },
    Competition {
        code: "PD",
        name: "La Liga",
        id: 2014,
    },
    Competition {
        code: "SA",
        name: "Serie A",
        id: 2019,
    },
    Competition {
        code: "BL1",
        name: "Bundesliga",
        id: 2002,
    },
    Competition {
        code: "FL1",
        name: "Ligue 1",
        id: 2015,
    },
    Competition {
        code: "MLS",
        name: "MLS",
        id: 2145,
    },
    Competition {
        code: "DED",
        name: "Eredivisie",
        id: 2003,
    },
    Competition {
        code: "PPL",
        name: "Primeira Liga",
        id: 2017,
    },
    Competition {
        code: "ELC",
        name: "Championship",
        id: 2016,
    },
    // May not be served on every football-data.org plan.
    Competition {
        code: "SAU",
        name: "Saudi Pro League",
        id: 3141,
    },
];

/// Leagues the scanner walks when nothing else is configured.
pub const SCANNER_DEFAULT_CODES: [&str; 5] = ["PL", "PD", "SA", "BL1", "FL1"];

pub fn competition_by_code(code: &str) -> Option<&'static Competition> {
    let code = code.trim();
    COMPETITIONS
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn scanner_defaults() -> Vec<&'static Competition> {
    SCANNER_DEFAULT_CODES
        .iter()
        .filter_map(|code| competition_by_code(code))
        .collect()
}

/// Parses a comma separated list such as `"PL, sa,BL1"`. Unknown codes are an
/// error; duplicates collapse to the first occurrence.
pub fn parse_competition_list(raw: &str) -> Result<Vec<&'static Competition>> {
    let mut out: Vec<&'static Competition> = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let comp =
            competition_by_code(part).ok_or_else(|| anyhow!("unknown competition code {part:?}"))?;
        if !out.iter().any(|c| c.code == comp.code) {
            out.push(comp);
        }
    }
    if out.is_empty() {
        return Err(anyhow!("no competition codes in {raw:?}"));
    }
    Ok(out)
}
