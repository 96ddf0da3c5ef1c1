/// Shard files of the dump1090 aircraft database (`public_html/db`).
///
/// Each shard is named after the identifier prefix it covers and only stores
/// the remaining suffix of each identifier as its keys.
pub const AIRCRAFT_SHARDS: &[&str] = &[
    "A1C.json", "A35.json", "A3E.json", "A6C.json", "A08.json", "A71.json", "AD4.json", "A1D.json",
    "A82.json", "A68.json", "A65.json", "8.json", "AC7.json", "A38.json", "AB0.json", "A03.json",
    "A0.json", "A6A.json", "A1A.json", "A96.json", "A88.json", "AD5.json", "A5E.json", "AB.json",
    "A48.json", "A47.json", "AA8.json", "C.json", "A36.json", "A98.json", "A7F.json", "A59.json",
    "A2.json", "A90.json", "AC8.json", "44.json", "ADB.json", "A32.json", "ADC.json", "7C7.json",
    "A1E.json", "AA2.json", "AB8.json", "A1.json", "A94.json", "ACA.json", "A42.json", "A4C.json",
    "7.json", "43.json", "A70.json", "AB2.json", "A8B.json", "AC1.json", "A76.json", "A3.json",
    "AD1.json", "AD8.json", "A20.json", "ABA.json", "A56.json", "ACF.json", "A7E.json", "A63.json",
    "484.json", "A72.json", "A60.json", "A6D.json", "7C1.json", "A05.json", "A40.json", "A4F.json",
    "A53.json", "7C2.json", "E4.json", "A4E.json", "A51.json", "A89.json", "A80.json", "AC6.json",
    "A1B.json", "A1F.json", "A6.json", "AD3.json", "A7D.json", "AC2.json", "A15.json", "A7C.json",
    "A97.json", "4D.json", "A0D.json", "A64.json", "A0B.json", "A17.json", "AAD.json", "A87.json",
    "ADE.json", "48.json", "AC.json", "ACE.json", "A37.json", "A9D.json", "9.json", "A2E.json",
    "AAF.json", "AD7.json", "A5.json", "ABB.json", "A81.json", "AB6.json", "AA6.json", "A9C.json",
    "AB1.json", "A02.json", "A24.json", "A4.json", "A0A.json", "AB9.json", "A23.json", "ADD.json",
    "4C.json", "A9.json", "A01.json", "42.json", "A21.json", "A66.json", "A12.json", "E.json",
    "A69.json", "7C.json", "A54.json", "AD2.json", "AA0.json", "A52.json", "A06.json", "ACC.json",
    "A16.json", "A29.json", "A2A.json", "A45.json", "7C4.json", "A57.json", "2.json", "AA7.json",
    "A9A.json", "39.json", "A22.json", "A31.json", "400.json", "AD6.json", "AB4.json", "AA1.json",
    "7C0.json", "A41.json", "ACD.json", "AD.json", "A4D.json", "A95.json", "AB5.json", "A55.json",
    "A19.json", "ACB.json", "A3B.json", "AA4.json", "AC3.json", "A26.json", "7C3.json", "A8A.json",
    "A74.json", "D.json", "A58.json", "A33.json", "A73.json", "AB7.json", "ABD.json", "4B.json",
    "A9E.json", "3.json", "A92.json", "A5B.json", "AA3.json", "A99.json", "A14.json", "A09.json",
    "A5A.json", "6.json", "A79.json", "A11.json", "4.json", "A77.json", "A07.json", "AA5.json",
    "0.json", "7C6.json", "A4B.json", "AAE.json", "A04.json", "F.json", "AD0.json", "A9F.json",
    "A18.json", "A6E.json", "A86.json", "A3C.json", "A84.json", "A0C.json", "A50.json", "A83.json",
    "A5D.json", "ADA.json", "A7.json", "AC9.json", "A34.json", "ABC.json", "A2D.json", "B.json",
    "A0F.json", "5.json", "A6F.json", "A44.json", "AC4.json", "A2C.json", "A8C.json", "AAA.json",
    "AAB.json", "A00.json", "A6B.json", "A4A.json", "A.json", "A9B.json", "406.json", "A85.json",
    "A8D.json", "A78.json", "A43.json", "AA.json", "A2F.json", "A8.json", "A27.json", "40.json",
    "A3F.json", "A25.json", "1.json", "A39.json", "A3A.json", "AB3.json", "A67.json", "3C.json",
];

/// Identifier prefix covered by a shard file name.
pub fn shard_prefix(shard: &str) -> &str {
    shard.strip_suffix(".json").unwrap_or(shard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn manifest_has_no_duplicates() {
        let unique: HashSet<_> = AIRCRAFT_SHARDS.iter().collect();
        assert_eq!(unique.len(), AIRCRAFT_SHARDS.len());
        assert_eq!(AIRCRAFT_SHARDS.len(), 248);
    }

    #[test]
    fn prefix_is_file_stem() {
        assert_eq!(shard_prefix("A1C.json"), "A1C");
        assert_eq!(shard_prefix("3C.json"), "3C");
        assert_eq!(shard_prefix("README"), "README");
    }
}
