//! Reversible share-code scheme for run seeds.
//! Code format: PX-<WORD><NN>, e.g., PX-WAGON42, PX-RIVER07

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn sanitize_word(word: &str) -> String {
    word.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// Word list for share codes
pub const WORD_LIST: [&str; 32] = [
    "WAGON", "OXEN", "RIVER", "FORD", "RAFT", "GUIDE", "TRAIL", "MILES", "PLAINS", "ROCKIES",
    "FRONTIER", "MEADOW", "BUCK", "DOE", "BEAR", "HUNT", "AMMO", "FOOD", "PARTS", "MEDS", "CAMP",
    "DUSK", "DAWN", "STORM", "CREEK", "RIDGE", "VALLEY", "PRAIRIE", "SUMMIT", "PIXEL", "SPRITE",
    "OREGON",
];

#[inline]
fn pack(word_index: u16, nn: u8) -> u16 {
    word_index & 0x001F | ((u16::from(nn) & 0x7F) << 5)
}

#[inline]
fn unpack(packed: u16) -> (u16, u8) {
    (packed & 0x001F, ((packed >> 5) & 0x7F) as u8)
}

fn compose_seed(word_index: u16, nn: u8) -> u64 {
    let packed = pack(word_index, nn);
    // Domain-separated FNV input
    let mut buf = [0u8; 9];
    buf[..6].copy_from_slice(b"PXTRL-");
    buf[6] = (packed & 0xFF) as u8;
    buf[7] = (packed >> 8) as u8;
    buf[8] = 0xA5;
    let h = fnv1a64(&buf);
    (h & 0xFFFF_FFFF_FFFF_0000) | u64::from(packed)
}

#[must_use]
pub fn encode_friendly(seed: u64) -> String {
    let packed = (seed & 0xFFFF) as u16;
    let (wi, mut nn) = unpack(packed);
    let word = WORD_LIST.get(wi as usize).copied().unwrap_or("WAGON");
    if nn > 99 {
        nn %= 100;
    }
    format!("PX-{word}{nn:02}")
}

#[must_use]
pub fn decode_to_seed(code: &str) -> Option<u64> {
    let s = code.trim();
    let (prefix, rest) = s.split_once('-')?;
    if !prefix.eq_ignore_ascii_case("PX") {
        return None;
    }
    if rest.len() < 3 {
        return None;
    }
    let (word_part, nn_part) = rest.split_at(rest.len() - 2);
    let nn: u8 = nn_part.parse().ok()?;
    let word = sanitize_word(word_part);
    let idx = WORD_LIST.iter().position(|w| sanitize_word(w) == word)?;
    let wi = u16::try_from(idx).ok()?;
    Some(compose_seed(wi, nn))
}

#[must_use]
pub fn generate_code_from_entropy(entropy: u64) -> String {
    let wi = u16::try_from(entropy % WORD_LIST.len() as u64).unwrap_or(0);
    let nn = ((entropy >> 17) % 100) as u8;
    let seed = compose_seed(wi, nn);
    encode_friendly(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrips_code() {
        let seed = 0xDEAD_BEEF_CAFE_BABE;
        let code = encode_friendly(seed);
        let new_seed = decode_to_seed(&code).unwrap();
        assert_eq!(encode_friendly(new_seed), code);
    }

    #[test]
    fn px_river_07_stable() {
        let seed = decode_to_seed("PX-RIVER07").unwrap();
        assert_eq!(encode_friendly(seed), "PX-RIVER07");
    }

    #[test]
    fn rejects_foreign_prefixes_and_garbage() {
        assert!(decode_to_seed("ZZ-RIVER07").is_none());
        assert!(decode_to_seed("PX-").is_none());
        assert!(decode_to_seed("PX-NOTAWORD99").is_none());
    }

    #[test]
    fn entropy_codes_parse_back() {
        for entropy in [0u64, 1, 42, u64::MAX / 3] {
            let code = generate_code_from_entropy(entropy);
            assert!(decode_to_seed(&code).is_some(), "code {code}");
        }
    }
}
