pub const TRACKED_ORG: &str = "NixOS";
pub const TRACKED_REPO: &str = "nixpkgs";

// r-ryantm files automated version bumps at a rate that drowns out humans
pub const AUTOMATED_ACCOUNTS: [&str; 1] = ["r-ryantm"];
