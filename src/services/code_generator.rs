//! 短码生成
//!
//! 随机抽取短码并通过 [`CodeLookup`] 检查是否已被占用，
//! 尝试次数有上限，耗尽后返回 `CodeSpaceExhausted`。

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::LinksConfig;
use crate::errors::{LinkdropError, Result};
use crate::utils::{CODE_ALPHABET, MAX_CODE_LENGTH, generate_code_from};

/// 短码占用查询
#[async_trait]
pub trait CodeLookup: Send + Sync {
    async fn code_exists(&self, code: &str) -> Result<bool>;
}

/// 一次创建流程内共享的尝试次数
///
/// 预检查命中和插入时的唯一约束冲突都消耗同一份额度。
#[derive(Debug, Clone, Copy)]
pub struct AttemptBudget {
    used: u32,
    max: u32,
}

impl AttemptBudget {
    pub fn new(max: u32) -> Self {
        Self { used: 0, max }
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    fn take(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.used += 1;
        true
    }

    fn exhausted_error(&self) -> LinkdropError {
        LinkdropError::code_space_exhausted(format!(
            "Unable to find an unused short code after {} attempts",
            self.used
        ))
    }
}

#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<u8>,
    length: usize,
    max_attempts: u32,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(6, 10)
    }
}

impl CodeGenerator {
    pub fn new(length: usize, max_attempts: u32) -> Self {
        Self::with_alphabet(CODE_ALPHABET, length, max_attempts)
    }

    /// 自定义字符集；空字符集回退到默认的 62 字符，长度限制在 1..=32
    pub fn with_alphabet(alphabet: &[u8], length: usize, max_attempts: u32) -> Self {
        let alphabet = if alphabet.is_empty() {
            CODE_ALPHABET.to_vec()
        } else {
            alphabet.to_vec()
        };

        Self {
            alphabet,
            length: length.clamp(1, MAX_CODE_LENGTH),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &LinksConfig) -> Self {
        Self::new(config.code_length, config.max_code_attempts)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn budget(&self) -> AttemptBudget {
        AttemptBudget::new(self.max_attempts)
    }

    /// 生成一个随机短码（不检查占用）
    pub fn generate_code(&self) -> String {
        generate_code_from(&self.alphabet, self.length)
    }

    /// 生成一个当前未被占用的短码
    pub async fn generate_unique_code(&self, lookup: &dyn CodeLookup) -> Result<String> {
        let mut budget = self.budget();
        self.next_unused_code(lookup, &mut budget).await
    }

    /// 在给定额度内寻找未占用的短码
    ///
    /// 查询出错时直接返回错误，不消耗后续额度。
    pub async fn next_unused_code(
        &self,
        lookup: &dyn CodeLookup,
        budget: &mut AttemptBudget,
    ) -> Result<String> {
        while budget.take() {
            let code = self.generate_code();
            if !lookup.code_exists(&code).await? {
                return Ok(code);
            }
            debug!(
                "Short code collision on '{}' (attempt {}/{})",
                code,
                budget.used(),
                self.max_attempts
            );
        }

        warn!(
            "Short code space exhausted after {} attempts (length={}, alphabet={})",
            budget.used(),
            self.length,
            self.alphabet.len()
        );
        Err(budget.exhausted_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// 内存中的占用表，生成的短码立即登记
    #[derive(Default)]
    struct MemoryLookup {
        taken: Mutex<HashSet<String>>,
    }

    impl MemoryLookup {
        fn claim(&self, code: &str) -> bool {
            self.taken.lock().unwrap().insert(code.to_string())
        }
    }

    #[async_trait]
    impl CodeLookup for MemoryLookup {
        async fn code_exists(&self, code: &str) -> Result<bool> {
            Ok(self.taken.lock().unwrap().contains(code))
        }
    }

    /// 所有短码都已被占用
    #[derive(Default)]
    struct FullLookup {
        checks: AtomicU32,
    }

    #[async_trait]
    impl CodeLookup for FullLookup {
        async fn code_exists(&self, _code: &str) -> Result<bool> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    struct BrokenLookup {
        checks: AtomicU32,
    }

    #[async_trait]
    impl CodeLookup for BrokenLookup {
        async fn code_exists(&self, _code: &str) -> Result<bool> {
            self.checks.fetch_add(1, Ordering::SeqCst);
            Err(LinkdropError::database_connection("connection refused"))
        }
    }

    #[test]
    fn test_generate_code_shape() {
        let generator = CodeGenerator::default();
        for _ in 0..200 {
            let code = generator.generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_empty_alphabet_falls_back() {
        let generator = CodeGenerator::with_alphabet(b"", 4, 3);
        assert_eq!(generator.alphabet(), CODE_ALPHABET);
        assert_eq!(generator.generate_code().len(), 4);
    }

    #[test]
    fn test_from_config() {
        let generator = CodeGenerator::from_config(&LinksConfig {
            code_length: 8,
            max_code_attempts: 4,
        });
        assert_eq!(generator.length(), 8);
        assert_eq!(generator.max_attempts(), 4);
    }

    #[tokio::test]
    async fn test_ten_thousand_codes_never_collide() {
        // 8^6 = 262144 个短码，10000 次生成中会出现碰撞并由重试消化
        let generator = CodeGenerator::with_alphabet(b"abcdefgh", 6, 10);
        let lookup = MemoryLookup::default();

        for _ in 0..10_000 {
            let code = generator.generate_unique_code(&lookup).await.unwrap();
            assert!(lookup.claim(&code), "duplicate code generated: {}", code);
        }

        assert_eq!(lookup.taken.lock().unwrap().len(), 10_000);
    }

    #[tokio::test]
    async fn test_exhaustion_after_exact_attempts() {
        let generator = CodeGenerator::new(6, 7);
        let lookup = FullLookup::default();

        let err = generator.generate_unique_code(&lookup).await.unwrap_err();

        assert!(matches!(err, LinkdropError::CodeSpaceExhausted(_)));
        assert!(err.is_storage_fault());
        assert_eq!(lookup.checks.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn test_lookup_error_is_not_looped() {
        let generator = CodeGenerator::new(6, 10);
        let lookup = BrokenLookup {
            checks: AtomicU32::new(0),
        };

        let err = generator.generate_unique_code(&lookup).await.unwrap_err();

        assert!(matches!(err, LinkdropError::DatabaseConnection(_)));
        assert_eq!(lookup.checks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shared_budget_across_calls() {
        let generator = CodeGenerator::new(6, 3);
        let lookup = MemoryLookup::default();
        let mut budget = generator.budget();

        generator.next_unused_code(&lookup, &mut budget).await.unwrap();
        generator.next_unused_code(&lookup, &mut budget).await.unwrap();
        generator.next_unused_code(&lookup, &mut budget).await.unwrap();
        assert!(budget.is_exhausted());

        let err = generator
            .next_unused_code(&lookup, &mut budget)
            .await
            .unwrap_err();
        assert!(matches!(err, LinkdropError::CodeSpaceExhausted(_)));
    }
}
