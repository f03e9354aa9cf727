//! プライベートルーム用パスワードのハッシュ化
//!
//! ルームのパスワードは平文では保存せず、argon2 の PHC 文字列として
//! 保存する。照合はハッシュに対してのみ行う。

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// パスワードハッシュ化のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    HashFailed(String),
}

/// パスワードを argon2 でハッシュ化して PHC 文字列を返す
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashFailed(e.to_string()))
}

/// パスワードを PHC 文字列と照合する
///
/// 保存されたハッシュが壊れている場合も不一致として扱う。
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_produces_phc_string() {
        // テスト項目: ハッシュは PHC 形式で、平文を含まない
        // given (前提条件):
        let plain = "xyz";

        // when (操作):
        let hash = hash_password(plain).unwrap();

        // then (期待する結果):
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, plain);
    }

    #[test]
    fn test_verify_password_roundtrip() {
        // テスト項目: 正しいパスワードは照合に成功し、誤りは失敗する
        // given (前提条件):
        let hash = hash_password("xyz").unwrap();

        // when (操作) / then (期待する結果):
        assert!(verify_password("xyz", &hash));
        assert!(!verify_password("abc", &hash));
    }

    #[test]
    fn test_verify_password_with_broken_hash() {
        // テスト項目: 壊れたハッシュ文字列は常に不一致になる
        // given (前提条件):
        let broken = "not-a-phc-string";

        // when (操作):
        let result = verify_password("xyz", broken);

        // then (期待する結果):
        assert!(!result);
    }
}
