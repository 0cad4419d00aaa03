//! Known-answer digests over `""` and `"abc"`

use rhash_core::HashAlgorithm;

/// Expected lowercase hex digest of `input`
#[derive(Debug, Clone, Copy)]
pub struct KnownVector {
    pub algorithm: HashAlgorithm,
    pub input: &'static [u8],
    pub hex: &'static str,
}

macro_rules! vector {
    ($algorithm:ident, $input:expr, $hex:expr) => {
        KnownVector {
            algorithm: HashAlgorithm::$algorithm,
            input: $input,
            hex: $hex,
        }
    };
}

pub const KNOWN_VECTORS: &[KnownVector] = &[
    vector!(MD5, b"", "d41d8cd98f00b204e9800998ecf8427e"),
    vector!(MD5, b"abc", "900150983cd24fb0d6963f7d28e17f72"),
    vector!(SHA256, b"", "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    vector!(SHA256, b"abc", "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
    vector!(SHA1, b"", "da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    vector!(SHA1, b"abc", "a9993e364706816aba3e25717850c26c9cd0d89d"),
    vector!(MD4, b"", "31d6cfe0d16ae931b73c59d7e0c089c0"),
    vector!(MD4, b"abc", "a448017aaf21d8525fc10ae87aa6729d"),
    vector!(CRC32, b"", "00000000"),
    vector!(CRC32, b"abc", "352441c2"),
    vector!(ED2K, b"", "31d6cfe0d16ae931b73c59d7e0c089c0"),
    vector!(ED2K, b"abc", "a448017aaf21d8525fc10ae87aa6729d"),
    vector!(Tiger, b"", "3293ac630c13f0245f92bbb1766e16167a4e58492dde73f3"),
    vector!(Tiger, b"abc", "2aab1484e8c158f2bfb8c5ff41b57a525129131c957b5f93"),
    vector!(TTH, b"", "5d9ed00a030e638bdb753a6a24fb900e5a63b8e73e6c25b6"),
    vector!(TTH, b"abc", "0487ca26443f59cfbc780f3ca0ce509c8c352c27c5dcca20"),
    vector!(SHA224, b"", "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f"),
    vector!(SHA224, b"abc", "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"),
    vector!(
        SHA384,
        b"",
        "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b"
    ),
    vector!(
        SHA384,
        b"abc",
        "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"
    ),
    vector!(
        SHA512,
        b"",
        "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    ),
    vector!(
        SHA512,
        b"abc",
        "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    ),
    vector!(SHA3_224, b"", "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7"),
    vector!(SHA3_224, b"abc", "e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf"),
    vector!(SHA3_256, b"", "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"),
    vector!(SHA3_256, b"abc", "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"),
    vector!(
        SHA3_384,
        b"",
        "0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2ac3713831264adb47fb6bd1e058d5f004"
    ),
    vector!(
        SHA3_384,
        b"abc",
        "ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b298d88cea927ac7f539f1edf228376d25"
    ),
    vector!(
        SHA3_512,
        b"",
        "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a615b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
    ),
    vector!(
        SHA3_512,
        b"abc",
        "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
    ),
    vector!(BLAKE2s, b"", "69217a3079908094e11121d042354a7c1f55b6482ca1a51e1b250dfd1ed0eef9"),
    vector!(BLAKE2s, b"abc", "508c5e8c327c14e2e1a72ba34eeb452f37458b209ed63a294d999b4c86675982"),
    vector!(
        BLAKE2b,
        b"",
        "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
    ),
    vector!(
        BLAKE2b,
        b"abc",
        "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d17d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
    ),
];
