//! Address classification.
//!
//! Decides whether a string can stand as an endpoint of a connection: either an
//! EVM address or an ENS name. Platform-internal profile ids fail both checks.

const ADDRESS_PREFIXES: [&str; 2] = ["0x", "0X"];
const ADDRESS_HEX_LEN: usize = 40;
const ENS_SUFFIX: &str = ".eth";

/// `0x` followed by exactly 40 hex digits.
pub fn is_address(s: &str) -> bool {
    ADDRESS_PREFIXES
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
        .map(|digits| digits.len() == ADDRESS_HEX_LEN && hex::decode(digits).is_ok())
        .unwrap_or(false)
}

/// Name longer than the suffix itself, ending in `.eth` (case-sensitive).
pub fn is_ens_name(s: &str) -> bool {
    s.len() > ENS_SUFFIX.len() && s.ends_with(ENS_SUFFIX)
}

/// True when `s` is an address or an ENS name.
pub fn is_resolvable_identity(s: &str) -> bool {
    is_address(s) || is_ens_name(s)
}
