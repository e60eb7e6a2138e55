//! Static policy dictionaries.
//!
//! All tables are lowercase. The bigram pre-filter set must cover every
//! entry of every blocking table — `prefilter_covers_all_dictionaries`
//! below keeps that honest when terms are added.

use crate::result::Category;

/// Known-prohibited action identifiers, matched exactly against the whole
/// (trimmed, lowercased) input.
pub const EXACT_ACTIONS: &[(&str, Category)] = &[
    ("influence_election", Category::Political),
    ("fund_campaign", Category::Political),
    ("bribe_official", Category::Political),
    ("incite_violence", Category::Violence),
    ("acquire_weapons", Category::Violence),
    ("hire_hitman", Category::Violence),
    ("launder_money", Category::Illegal),
    ("evade_taxes", Category::Illegal),
    ("smuggle_goods", Category::Illegal),
];

/// Primary keyword scan. The boolean marks terms that must match on word
/// boundaries: "vote" may not fire inside "devoted", "pac" not inside
/// "impact", "bomb" not inside "bombastic", "ransom" not inside
/// "ransome" (that one belongs to the misspelling table).
pub const PRIMARY_KEYWORDS: &[(&str, Category, bool)] = &[
    ("election", Category::Political, false),
    ("electoral", Category::Political, false),
    ("ballot", Category::Political, false),
    ("campaign", Category::Political, false),
    ("lobbying", Category::Political, false),
    ("lobbyist", Category::Political, false),
    ("referendum", Category::Political, false),
    ("propaganda", Category::Political, false),
    ("voter", Category::Political, false),
    ("vote", Category::Political, true),
    ("pac", Category::Political, true),
    ("assassination", Category::Violence, false),
    ("assassinate", Category::Violence, false),
    ("murder", Category::Violence, false),
    ("kidnap", Category::Violence, false),
    ("firearm", Category::Violence, false),
    ("weapon", Category::Violence, false),
    ("bomb", Category::Violence, true),
    ("massacre", Category::Violence, false),
    ("launder", Category::Illegal, false),
    ("ransom", Category::Illegal, true),
    ("smuggle", Category::Illegal, false),
    ("bribery", Category::Illegal, false),
    ("bribe", Category::Illegal, false),
    ("narcotics", Category::Illegal, false),
    ("counterfeit", Category::Illegal, false),
    ("extortion", Category::Illegal, false),
];

/// Observed misspellings of primary terms.
pub const MISSPELLINGS: &[(&str, Category)] = &[
    ("campain", Category::Political),
    ("camapign", Category::Political),
    ("elction", Category::Political),
    ("electon", Category::Political),
    ("ellection", Category::Political),
    ("balot", Category::Political),
    ("lobying", Category::Political),
    ("propoganda", Category::Political),
    ("asassination", Category::Violence),
    ("assasination", Category::Violence),
    ("murdur", Category::Violence),
    ("wepon", Category::Violence),
    ("ransome", Category::Illegal),
    ("brybe", Category::Illegal),
];

/// Curated multi-word phrases whose individual words are benign or merely
/// advisory on their own.
pub const PHRASES: &[(&str, Category)] = &[
    ("influence the election", Category::Political),
    ("political contribution", Category::Political),
    ("public opinion manipulation", Category::Political),
    ("dark money", Category::Political),
    ("rig the outcome", Category::Political),
    ("overthrow the government", Category::Violence),
    ("take up arms", Category::Violence),
    ("insider trading", Category::Illegal),
    ("pay off officials", Category::Illegal),
];

/// Contextual terms with high recall but high false-positive rates in
/// ordinary asset-management language ("insurance policy distribution",
/// "conservative estimate"). Matched on word boundaries; never blocking,
/// recorded for audit only.
pub const CONTEXTUAL_KEYWORDS: &[(&str, Category)] = &[
    ("policy", Category::Political),
    ("influence", Category::Political),
    ("conservative", Category::Political),
    ("liberal", Category::Political),
    ("government", Category::Political),
    ("governance", Category::Political),
    ("regulation", Category::Political),
    ("legislation", Category::Political),
];

/// Single-character leet substitutions applied before the re-scan.
pub const LEET_SUBSTITUTIONS: &[(char, char)] = &[
    ('0', 'o'),
    ('1', 'i'),
    ('3', 'e'),
    ('4', 'a'),
    ('5', 's'),
    ('7', 't'),
    ('8', 'b'),
    ('@', 'a'),
    ('$', 's'),
    ('!', 'i'),
];

/// Two-character sequences present in every known prohibited term,
/// including leet-stable pairs ("0t", "1o", "3l") so that digit-substituted
/// variants still reach the normalization stage. Text containing none of
/// these cannot match any blocking table, so the scan stops after one
/// linear pass.
pub const PREFILTER_BIGRAMS: &[&str] = &[
    "el", "ct", "mp", "ll", "ot", "vo", "nd", "ns", "ss", "rd", "ap", "rm", "ea", "mu", "ug",
    "ib", "rc", "nt", "ma", "ar", "ol", "ow", "ig", "ov", "bb", "pa", "mb", "rt", "ob", "br",
    "we", "ax", "va", "0t", "1o", "3l",
];
