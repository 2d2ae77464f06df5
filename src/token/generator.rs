use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

/// 令牌随机字节数
pub const TOKEN_BYTES: usize = 64;

/// 生成加密安全、URL 安全且无填充的随机令牌（64 字节编码后 86 个字符）
pub fn generate_random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
