/// Returns the lowercase machine architecture of the current host.
///
/// Passed through verbatim into the Linux binary suffix and the build
/// record, so no allow-list of known values is applied here.
pub fn arch() -> String {
  std::env::consts::ARCH.to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn arch_is_lowercase() {
    let a = arch();
    assert!(!a.is_empty());
    assert_eq!(a, a.to_lowercase());
  }
}
