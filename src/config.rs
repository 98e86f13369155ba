//! The configuration file parser.
//!
//! A deliberately small line-oriented format — `key = value`, `#` comments,
//! blank lines ignored, keys case-folded — rather than pulling in a TOML
//! parser for a format this bespoke. Returns [`ConfigError`] naming exactly
//! which key was missing, unknown, or malformed, per the error design.

use std::collections::HashMap;
use std::path::Path;

use crate::driver::DEFAULT_BUFFER_CAPACITY;
use crate::error::ConfigError;
use crate::params::{
    AeMode, AeParams, AlgoParams, CrcParams, FastCdcParams, FixedParams, GearParams, MaxpParams, RabinParams,
    RamParams, SeqMode, SeqParams, TttdParams,
};
use crate::simd::SimdMode;

const RECOGNISED_KEYS: &[&str] = &[
    "chunking_algo",
    "hashing_algo",
    "simd_mode",
    "output_file",
    "buffer_size",
    "fixed_size",
    "ae_window_size",
    "ae_mode",
    "maxp_window_size",
    "maxp_max_block",
    "ram_window_size",
    "ram_max_block",
    "gear_min_block",
    "gear_avg_block",
    "gear_max_block",
    "fastcdc_min_block",
    "fastcdc_avg_block",
    "fastcdc_max_block",
    "fastcdc_norm_level",
    "rabin_window_size",
    "rabin_min_block",
    "rabin_avg_block",
    "rabin_max_block",
    "tttd_window_size",
    "tttd_min",
    "tttd_avg",
    "tttd_max",
    "seq_length_threshold",
    "seq_jump_trigger",
    "seq_jump_size",
    "seq_mode",
    "seq_min",
    "seq_max",
    "crc_min",
    "crc_avg",
    "crc_max",
    "crc_window_size",
    "crc_window_step",
    "crc_hash_bits",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub algo: AlgoParams,
    pub hashing_algo: String,
    pub output_file: String,
    pub buffer_size: usize,
}

/// Parses a config file at `path` into a fully resolved [`Config`].
pub fn parse(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
    parse_str(&text)
}

fn parse_str(text: &str) -> Result<Config, ConfigError> {
    let mut map = HashMap::new();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::InvalidValue {
                key: "<line>",
                reason: format!("expected `key = value`, got `{}`", line),
            });
        };
        let key = key.trim().to_lowercase();
        let value = value.trim().to_string();
        if !RECOGNISED_KEYS.contains(&key.as_str()) {
            return Err(ConfigError::UnknownKey(key));
        }
        map.insert(key, value);
    }

    let algo_name = require_str(&map, "chunking_algo")?;
    let algo = build_algo_params(algo_name, &map)?;

    let hashing_algo = map.get("hashing_algo").cloned().unwrap_or_else(|| "md5".to_string());
    // Validated eagerly, at parse time, like every other key — not left to
    // surface only once the CLI tries to construct the hash backend.
    crate::hashing::by_name(&hashing_algo)?;
    let output_file = map.get("output_file").cloned().unwrap_or_else(|| "hashes.out".to_string());
    let buffer_size = match map.get("buffer_size") {
        Some(v) => parse_usize("buffer_size", v)?,
        None => DEFAULT_BUFFER_CAPACITY,
    };

    Ok(Config { algo, hashing_algo, output_file, buffer_size })
}

fn require_str<'a>(map: &'a HashMap<String, String>, key: &'static str) -> Result<&'a str, ConfigError> {
    map.get(key).map(String::as_str).ok_or(ConfigError::MissingKey { algorithm: "<config>", key })
}

fn required(map: &HashMap<String, String>, algorithm: &'static str, key: &'static str) -> Result<usize, ConfigError> {
    let raw = map.get(key).ok_or(ConfigError::MissingKey { algorithm, key })?;
    parse_usize(key, raw)
}

fn parse_usize(key: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue { key, reason: format!("`{}` is not a non-negative integer", raw) })
}

fn parse_simd_mode(map: &HashMap<String, String>) -> Result<SimdMode, ConfigError> {
    match map.get("simd_mode").map(String::as_str).unwrap_or("none") {
        "none" => Ok(SimdMode::Scalar),
        "sse128" => Ok(SimdMode::Sse128),
        "avx256" => Ok(SimdMode::Avx256),
        "avx512" => Ok(SimdMode::Avx512),
        "neon" => Ok(SimdMode::Neon),
        "altivec" => Ok(SimdMode::Altivec),
        other => Err(ConfigError::UnknownSimdMode(other.to_string())),
    }
}

fn build_algo_params(algo_name: &str, map: &HashMap<String, String>) -> Result<AlgoParams, ConfigError> {
    let simd_mode = parse_simd_mode(map)?;
    Ok(match algo_name {
        "fixed" => AlgoParams::Fixed(FixedParams { fixed_size: required(map, "fixed", "fixed_size")? }),
        "ae" => AlgoParams::Ae(AeParams {
            window_size: required(map, "ae", "ae_window_size")?,
            mode: parse_ae_mode(map)?,
            simd_mode,
        }),
        "maxp" => AlgoParams::Maxp(MaxpParams {
            window_size: required(map, "maxp", "maxp_window_size")?,
            max_block: required(map, "maxp", "maxp_max_block")?,
            simd_mode,
        }),
        "ram" => AlgoParams::Ram(RamParams {
            window_size: required(map, "ram", "ram_window_size")?,
            max_block: required(map, "ram", "ram_max_block")?,
            simd_mode,
        }),
        "gear" => AlgoParams::Gear(GearParams {
            min_block: required(map, "gear", "gear_min_block")?,
            avg_block: required(map, "gear", "gear_avg_block")?,
            max_block: required(map, "gear", "gear_max_block")?,
        }),
        "fastcdc" => AlgoParams::FastCdc(FastCdcParams {
            min_block: required(map, "fastcdc", "fastcdc_min_block")?,
            avg_block: required(map, "fastcdc", "fastcdc_avg_block")?,
            max_block: required(map, "fastcdc", "fastcdc_max_block")?,
            norm_level: required(map, "fastcdc", "fastcdc_norm_level")? as u8,
        }),
        "rabins" => AlgoParams::Rabin(RabinParams {
            window_size: required(map, "rabins", "rabin_window_size")?,
            min_block: required(map, "rabins", "rabin_min_block")?,
            avg_block: required(map, "rabins", "rabin_avg_block")?,
            max_block: required(map, "rabins", "rabin_max_block")?,
        }),
        "tttd" => AlgoParams::Tttd(TttdParams {
            min: required(map, "tttd", "tttd_min")?,
            avg: required(map, "tttd", "tttd_avg")?,
            max: required(map, "tttd", "tttd_max")?,
            window_size: required(map, "tttd", "tttd_window_size")?,
        }),
        "seq" => AlgoParams::Seq(SeqParams {
            length_threshold: required(map, "seq", "seq_length_threshold")?,
            jump_trigger: required(map, "seq", "seq_jump_trigger")?,
            jump_size: required(map, "seq", "seq_jump_size")?,
            mode: parse_seq_mode(map)?,
            min: required(map, "seq", "seq_min")?,
            max: required(map, "seq", "seq_max")?,
        }),
        "crc" => AlgoParams::Crc(CrcParams {
            min: required(map, "crc", "crc_min")?,
            avg: required(map, "crc", "crc_avg")?,
            max: required(map, "crc", "crc_max")?,
            window_size: required(map, "crc", "crc_window_size")?,
            window_step: required(map, "crc", "crc_window_step")?,
            hash_bits: required(map, "crc", "crc_hash_bits")? as u32,
        }),
        other => return Err(ConfigError::UnknownAlgorithm(other.to_string())),
    })
}

fn parse_ae_mode(map: &HashMap<String, String>) -> Result<AeMode, ConfigError> {
    match map.get("ae_mode").map(String::as_str) {
        Some("max") => Ok(AeMode::Max),
        Some("min") => Ok(AeMode::Min),
        Some(other) => Err(ConfigError::InvalidValue { key: "ae_mode", reason: format!("expected max or min, got `{}`", other) }),
        None => Err(ConfigError::MissingKey { algorithm: "ae", key: "ae_mode" }),
    }
}

fn parse_seq_mode(map: &HashMap<String, String>) -> Result<SeqMode, ConfigError> {
    match map.get("seq_mode").map(String::as_str) {
        Some("increasing") => Ok(SeqMode::Increasing),
        Some("decreasing") => Ok(SeqMode::Decreasing),
        Some(other) => Err(ConfigError::InvalidValue { key: "seq_mode", reason: format!("expected increasing or decreasing, got `{}`", other) }),
        None => Err(ConfigError::MissingKey { algorithm: "seq", key: "seq_mode" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_fixed_config() {
        let text = "chunking_algo = fixed\nfixed_size = 8192\n";
        let config = parse_str(text).unwrap();
        assert!(matches!(config.algo, AlgoParams::Fixed(FixedParams { fixed_size: 8192 })));
        assert_eq!(config.output_file, "hashes.out");
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_CAPACITY);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let text = "# a comment\n\nchunking_algo = fixed\nfixed_size = 64\n";
        assert!(parse_str(text).is_ok());
    }

    #[test]
    fn keys_are_case_folded() {
        let text = "CHUNKING_ALGO = fixed\nFIXED_SIZE = 64\n";
        assert!(parse_str(text).is_ok());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let text = "chunking_algo = fixed\nfixed_size = 64\nnot_a_real_key = 1\n";
        assert!(matches!(parse_str(text), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn missing_required_key_names_it() {
        let text = "chunking_algo = fixed\n";
        match parse_str(text) {
            Err(ConfigError::MissingKey { key, .. }) => assert_eq!(key, "fixed_size"),
            other => panic!("expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let text = "chunking_algo = not_an_algorithm\n";
        assert!(matches!(parse_str(text), Err(ConfigError::UnknownAlgorithm(_))));
    }

    #[test]
    fn unknown_hashing_algorithm_is_rejected_at_parse_time() {
        let text = "chunking_algo = fixed\nfixed_size = 64\nhashing_algo = not_a_real_hash\n";
        assert!(matches!(parse_str(text), Err(ConfigError::UnknownHashingAlgorithm(_))));
    }

    #[test]
    fn full_fastcdc_config_with_overrides() {
        let text = "chunking_algo = fastcdc\n\
                     fastcdc_min_block = 512\n\
                     fastcdc_avg_block = 2048\n\
                     fastcdc_max_block = 8192\n\
                     fastcdc_norm_level = 2\n\
                     simd_mode = none\n\
                     hashing_algo = sha256\n\
                     output_file = out.txt\n\
                     buffer_size = 4096\n";
        let config = parse_str(text).unwrap();
        assert!(matches!(config.algo, AlgoParams::FastCdc(_)));
        assert_eq!(config.hashing_algo, "sha256");
        assert_eq!(config.output_file, "out.txt");
        assert_eq!(config.buffer_size, 4096);
    }
}
