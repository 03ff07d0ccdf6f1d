mod antrea_install;

pub use antrea_install::{AntreaInstall, AntreaInstallSpec, AntreaInstallStatus, InstallCondition};
