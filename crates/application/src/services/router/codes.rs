//! Mnemonic <-> wire code translation for rule matchers.
//!
//! Both directions come from one table of IANA resource record types, built
//! once on first use. Lookups are exact and case-sensitive. Classes use the
//! fixed set a rule may name.

use ferrous_route_domain::RuleError;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Code stored in a rule whose type or class matches anything.
pub const WILDCARD: u16 = 0;

const RECORD_TYPES: [(&str, u16); 93] = [
    ("A", 1),
    ("NS", 2),
    ("MD", 3),
    ("MF", 4),
    ("CNAME", 5),
    ("SOA", 6),
    ("MB", 7),
    ("MG", 8),
    ("MR", 9),
    ("NULL", 10),
    ("WKS", 11),
    ("PTR", 12),
    ("HINFO", 13),
    ("MINFO", 14),
    ("MX", 15),
    ("TXT", 16),
    ("RP", 17),
    ("AFSDB", 18),
    ("X25", 19),
    ("ISDN", 20),
    ("RT", 21),
    ("NSAP", 22),
    ("NSAP-PTR", 23),
    ("SIG", 24),
    ("KEY", 25),
    ("PX", 26),
    ("GPOS", 27),
    ("AAAA", 28),
    ("LOC", 29),
    ("NXT", 30),
    ("EID", 31),
    ("NIMLOC", 32),
    ("SRV", 33),
    ("ATMA", 34),
    ("NAPTR", 35),
    ("KX", 36),
    ("CERT", 37),
    ("A6", 38),
    ("DNAME", 39),
    ("SINK", 40),
    ("OPT", 41),
    ("APL", 42),
    ("DS", 43),
    ("SSHFP", 44),
    ("IPSECKEY", 45),
    ("RRSIG", 46),
    ("NSEC", 47),
    ("DNSKEY", 48),
    ("DHCID", 49),
    ("NSEC3", 50),
    ("NSEC3PARAM", 51),
    ("TLSA", 52),
    ("SMIMEA", 53),
    ("HIP", 55),
    ("NINFO", 56),
    ("RKEY", 57),
    ("TALINK", 58),
    ("CDS", 59),
    ("CDNSKEY", 60),
    ("OPENPGPKEY", 61),
    ("CSYNC", 62),
    ("ZONEMD", 63),
    ("SVCB", 64),
    ("HTTPS", 65),
    ("DSYNC", 66),
    ("SPF", 99),
    ("UINFO", 100),
    ("UID", 101),
    ("GID", 102),
    ("UNSPEC", 103),
    ("NID", 104),
    ("L32", 105),
    ("L64", 106),
    ("LP", 107),
    ("EUI48", 108),
    ("EUI64", 109),
    ("NXNAME", 128),
    ("TKEY", 249),
    ("TSIG", 250),
    ("IXFR", 251),
    ("AXFR", 252),
    ("MAILB", 253),
    ("MAILA", 254),
    ("ANY", 255),
    ("URI", 256),
    ("CAA", 257),
    ("AVC", 258),
    ("DOA", 259),
    ("AMTRELAY", 260),
    ("RESINFO", 261),
    ("WALLET", 262),
    ("TA", 32768),
    ("DLV", 32769),
];

static TYPE_CODES: LazyLock<HashMap<&'static str, u16>> =
    LazyLock::new(|| RECORD_TYPES.iter().copied().collect());

static TYPE_NAMES: LazyLock<HashMap<u16, &'static str>> =
    LazyLock::new(|| RECORD_TYPES.iter().map(|&(name, code)| (code, name)).collect());

const CLASSES: [(&str, u16); 5] = [
    ("IN", 1),
    ("CH", 3),
    ("HS", 4),
    ("NONE", 254),
    ("ANY", 255),
];

pub fn type_code(mnemonic: &str) -> Result<u16, RuleError> {
    if mnemonic.is_empty() {
        return Ok(WILDCARD);
    }
    TYPE_CODES
        .get(mnemonic)
        .copied()
        .ok_or_else(|| RuleError::UnknownType(mnemonic.to_string()))
}

/// Mnemonic for a type code, `TYPE<n>` for codes without one.
pub fn type_name(code: u16) -> String {
    if code == WILDCARD {
        return "*".to_string();
    }
    match TYPE_NAMES.get(&code) {
        Some(name) => (*name).to_string(),
        None => format!("TYPE{}", code),
    }
}

pub fn class_code(mnemonic: &str) -> Result<u16, RuleError> {
    if mnemonic.is_empty() {
        return Ok(WILDCARD);
    }
    CLASSES
        .iter()
        .find(|(name, _)| *name == mnemonic)
        .map(|(_, code)| *code)
        .ok_or_else(|| RuleError::UnknownClass(mnemonic.to_string()))
}

pub fn class_name(code: u16) -> Option<&'static str> {
    CLASSES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}
