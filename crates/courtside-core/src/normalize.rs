// Name and team-code normalization shared by every data source.
//
// The fantasy provider, the projection sheet and the schedule grid each spell
// players and teams their own way. Everything that is used as a join key goes
// through this module first.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ---------------------------------------------------------------------------
// Player names
// ---------------------------------------------------------------------------

/// Known cross-source name discrepancies, keyed by the cleaned spelling.
const SEED_ALIASES: &[(&str, &str)] = &[
    ("PJ Washington Jr", "PJ Washington"),
    ("Nic Claxton", "Nicolas Claxton"),
    ("Alex Sarr", "Alexandre Sarr"),
    ("Troy Brown Jr", "Troy Brown"),
    ("Danuel House Jr", "Danuel House"),
    ("Marcus Morris Sr", "Marcus Morris"),
    ("Kelly Oubre", "Kelly Oubre Jr"),
    ("Jaren Jackson", "Jaren Jackson Jr"),
];

/// Strip accents and punctuation from a name.
///
/// The input is NFD-decomposed, combining marks are dropped, and then every
/// character that is not alphanumeric, whitespace, an apostrophe or a hyphen
/// is removed. The result is stable under a second application.
pub fn clean(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'' || *c == '-')
        .collect()
}

/// Canonicalizes player names across sources.
///
/// Holds the alias table; the table starts from a built-in seed list and can
/// be extended (e.g. from configuration). Keys and values are stored cleaned.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    aliases: HashMap<String, String>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        let aliases = SEED_ALIASES
            .iter()
            .map(|(from, to)| (clean(from), clean(to)))
            .collect();
        Self { aliases }
    }
}

impl NameNormalizer {
    /// Seed table plus extra `from -> to` overrides. Later entries win.
    pub fn with_aliases<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut normalizer = Self::default();
        for (from, to) in extra {
            normalizer
                .aliases
                .insert(clean(from.as_ref()), clean(to.as_ref()));
        }
        normalizer
    }

    /// Look up an already-cleaned name in the alias table.
    /// Returns the input unchanged when no alias is registered.
    pub fn resolve_alias(&self, cleaned: &str) -> String {
        self.aliases
            .get(cleaned)
            .cloned()
            .unwrap_or_else(|| cleaned.to_string())
    }

    /// `resolve_alias(clean(raw))`: the join key for player lookups.
    pub fn canonical_name(&self, raw: &str) -> String {
        self.resolve_alias(&clean(raw))
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// The 30 NBA franchises, identified by their canonical 3-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NbaTeam {
    Atl,
    Bos,
    Bkn,
    Cha,
    Chi,
    Cle,
    Dal,
    Den,
    Det,
    Gsw,
    Hou,
    Ind,
    Lac,
    Lal,
    Mem,
    Mia,
    Mil,
    Min,
    Nop,
    Nyk,
    Okc,
    Orl,
    Phi,
    Phx,
    Por,
    Sac,
    Sas,
    Tor,
    Uta,
    Was,
}

impl NbaTeam {
    pub const ALL: [NbaTeam; 30] = [
        NbaTeam::Atl,
        NbaTeam::Bos,
        NbaTeam::Bkn,
        NbaTeam::Cha,
        NbaTeam::Chi,
        NbaTeam::Cle,
        NbaTeam::Dal,
        NbaTeam::Den,
        NbaTeam::Det,
        NbaTeam::Gsw,
        NbaTeam::Hou,
        NbaTeam::Ind,
        NbaTeam::Lac,
        NbaTeam::Lal,
        NbaTeam::Mem,
        NbaTeam::Mia,
        NbaTeam::Mil,
        NbaTeam::Min,
        NbaTeam::Nop,
        NbaTeam::Nyk,
        NbaTeam::Okc,
        NbaTeam::Orl,
        NbaTeam::Phi,
        NbaTeam::Phx,
        NbaTeam::Por,
        NbaTeam::Sac,
        NbaTeam::Sas,
        NbaTeam::Tor,
        NbaTeam::Uta,
        NbaTeam::Was,
    ];

    /// Canonical 3-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            NbaTeam::Atl => "ATL",
            NbaTeam::Bos => "BOS",
            NbaTeam::Bkn => "BKN",
            NbaTeam::Cha => "CHA",
            NbaTeam::Chi => "CHI",
            NbaTeam::Cle => "CLE",
            NbaTeam::Dal => "DAL",
            NbaTeam::Den => "DEN",
            NbaTeam::Det => "DET",
            NbaTeam::Gsw => "GSW",
            NbaTeam::Hou => "HOU",
            NbaTeam::Ind => "IND",
            NbaTeam::Lac => "LAC",
            NbaTeam::Lal => "LAL",
            NbaTeam::Mem => "MEM",
            NbaTeam::Mia => "MIA",
            NbaTeam::Mil => "MIL",
            NbaTeam::Min => "MIN",
            NbaTeam::Nop => "NOP",
            NbaTeam::Nyk => "NYK",
            NbaTeam::Okc => "OKC",
            NbaTeam::Orl => "ORL",
            NbaTeam::Phi => "PHI",
            NbaTeam::Phx => "PHX",
            NbaTeam::Por => "POR",
            NbaTeam::Sac => "SAC",
            NbaTeam::Sas => "SAS",
            NbaTeam::Tor => "TOR",
            NbaTeam::Uta => "UTA",
            NbaTeam::Was => "WAS",
        }
    }

    /// Full franchise name as printed on schedule grids.
    pub fn full_name(&self) -> &'static str {
        match self {
            NbaTeam::Atl => "Atlanta Hawks",
            NbaTeam::Bos => "Boston Celtics",
            NbaTeam::Bkn => "Brooklyn Nets",
            NbaTeam::Cha => "Charlotte Hornets",
            NbaTeam::Chi => "Chicago Bulls",
            NbaTeam::Cle => "Cleveland Cavaliers",
            NbaTeam::Dal => "Dallas Mavericks",
            NbaTeam::Den => "Denver Nuggets",
            NbaTeam::Det => "Detroit Pistons",
            NbaTeam::Gsw => "Golden State Warriors",
            NbaTeam::Hou => "Houston Rockets",
            NbaTeam::Ind => "Indiana Pacers",
            NbaTeam::Lac => "Los Angeles Clippers",
            NbaTeam::Lal => "Los Angeles Lakers",
            NbaTeam::Mem => "Memphis Grizzlies",
            NbaTeam::Mia => "Miami Heat",
            NbaTeam::Mil => "Milwaukee Bucks",
            NbaTeam::Min => "Minnesota Timberwolves",
            NbaTeam::Nop => "New Orleans Pelicans",
            NbaTeam::Nyk => "New York Knicks",
            NbaTeam::Okc => "Oklahoma City Thunder",
            NbaTeam::Orl => "Orlando Magic",
            NbaTeam::Phi => "Philadelphia 76ers",
            NbaTeam::Phx => "Phoenix Suns",
            NbaTeam::Por => "Portland Trail Blazers",
            NbaTeam::Sac => "Sacramento Kings",
            NbaTeam::Sas => "San Antonio Spurs",
            NbaTeam::Tor => "Toronto Raptors",
            NbaTeam::Uta => "Utah Jazz",
            NbaTeam::Was => "Washington Wizards",
        }
    }

    /// Parse a canonical code (case-insensitive). Variants such as "GS" are
    /// not accepted here; run them through [`resolve_team_code`] first.
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.trim().to_uppercase();
        NbaTeam::ALL.iter().copied().find(|t| t.code() == upper)
    }
}

impl fmt::Display for NbaTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for NbaTeam {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Map a source-specific abbreviation to the canonical code.
///
/// Unrecognized codes are returned unchanged (trimmed), so a code that is
/// already canonical passes straight through.
pub fn resolve_team_code(raw: &str) -> String {
    let trimmed = raw.trim();
    let canonical = match trimmed.to_uppercase().as_str() {
        "GS" => "GSW",
        "SA" => "SAS",
        "NY" => "NYK",
        "NO" => "NOP",
        "PHO" => "PHX",
        "BRK" => "BKN",
        "CHO" => "CHA",
        "UTAH" => "UTA",
        "WSH" => "WAS",
        _ => return trimmed.to_string(),
    };
    canonical.to_string()
}

/// Closed full-name lookup. `None` means "not an NBA team", which grid
/// parsers use to skip header and spacer rows.
pub fn team_for_full_name(name: &str) -> Option<NbaTeam> {
    let name = name.trim();
    NbaTeam::ALL.iter().copied().find(|t| t.full_name() == name)
}

/// Resolve either a full name or any known code spelling to a team.
pub fn team_for_label(label: &str) -> Option<NbaTeam> {
    team_for_full_name(label).or_else(|| NbaTeam::from_code(&resolve_team_code(label)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clean --

    #[test]
    fn clean_strips_accents() {
        assert_eq!(clean("Nikola Jokić"), "Nikola Jokic");
        assert_eq!(clean("Luka Dončić"), "Luka Doncic");
        assert_eq!(clean("Kristaps Porziņģis"), "Kristaps Porzingis");
    }

    #[test]
    fn clean_drops_punctuation_but_keeps_apostrophe_and_hyphen() {
        assert_eq!(clean("P.J. Washington Jr."), "PJ Washington Jr");
        assert_eq!(clean("De'Aaron Fox"), "De'Aaron Fox");
        assert_eq!(clean("Shai Gilgeous-Alexander"), "Shai Gilgeous-Alexander");
        assert_eq!(clean("O.G. Anunoby*"), "OG Anunoby");
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "Nikola Jokić",
            "P.J. Washington Jr.",
            "Dāvis Bertāns",
            "Jusuf Nurkić (GTD)",
            "Bogdan Bogdanović",
            "",
            "   ",
            "Ñ-ñ 'x'.,;",
        ];
        for s in samples {
            let once = clean(s);
            assert_eq!(clean(&once), once, "clean not idempotent for {s:?}");
        }
    }

    // -- aliases --

    #[test]
    fn alias_resolves_known_discrepancies() {
        let n = NameNormalizer::default();
        assert_eq!(n.canonical_name("P.J. Washington Jr."), "PJ Washington");
        assert_eq!(n.canonical_name("Nic Claxton"), "Nicolas Claxton");
        assert_eq!(n.canonical_name("Alex Sarr"), "Alexandre Sarr");
    }

    #[test]
    fn alias_passes_unknown_names_through() {
        let n = NameNormalizer::default();
        assert_eq!(n.resolve_alias("LeBron James"), "LeBron James");
    }

    #[test]
    fn extra_aliases_are_cleaned_and_override_seed() {
        let n = NameNormalizer::with_aliases([
            ("Herb Jones", "Herbert Jones"),
            ("Nic Claxton", "Nic Claxton"),
        ]);
        assert_eq!(n.canonical_name("Herb Jones"), "Herbert Jones");
        assert_eq!(n.canonical_name("Nic Claxton"), "Nic Claxton");
        assert!(n.alias_count() > SEED_ALIASES.len());
    }

    // -- team codes --

    #[test]
    fn team_code_variants_resolve() {
        assert_eq!(resolve_team_code("GS"), "GSW");
        assert_eq!(resolve_team_code("SA"), "SAS");
        assert_eq!(resolve_team_code("NY"), "NYK");
        assert_eq!(resolve_team_code("NO"), "NOP");
        assert_eq!(resolve_team_code("PHO"), "PHX");
        assert_eq!(resolve_team_code("pho"), "PHX");
    }

    #[test]
    fn unknown_team_codes_pass_through() {
        assert_eq!(resolve_team_code("LAL"), "LAL");
        assert_eq!(resolve_team_code(" XYZ "), "XYZ");
        assert_eq!(resolve_team_code(""), "");
    }

    #[test]
    fn full_name_table_is_closed() {
        assert_eq!(team_for_full_name("Los Angeles Lakers"), Some(NbaTeam::Lal));
        assert_eq!(team_for_full_name(" Utah Jazz "), Some(NbaTeam::Uta));
        assert_eq!(team_for_full_name("Team"), None);
        assert_eq!(team_for_full_name("Seattle SuperSonics"), None);
    }

    #[test]
    fn all_teams_round_trip_through_code_and_name() {
        for team in NbaTeam::ALL {
            assert_eq!(NbaTeam::from_code(team.code()), Some(team));
            assert_eq!(team_for_full_name(team.full_name()), Some(team));
        }
    }

    #[test]
    fn label_lookup_accepts_names_and_variants() {
        assert_eq!(team_for_label("Golden State Warriors"), Some(NbaTeam::Gsw));
        assert_eq!(team_for_label("GS"), Some(NbaTeam::Gsw));
        assert_eq!(team_for_label("phx"), Some(NbaTeam::Phx));
        assert_eq!(team_for_label("Mon"), None);
    }
}
