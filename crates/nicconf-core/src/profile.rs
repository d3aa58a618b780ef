//! Region profiles
//!
//! Built-in command sets, one per deployment region. The command text is
//! exactly what the device expects on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::protocol::{CommandSet, ProtocolError};

const MATO_GROSSO: &[&str] = &[
    "$userdef,----,ENERGISA MT,00000000",
    "$simlib,1,ENERGISA.CLARO.COM.BR,10.200.1.204,40001,0,rs2000,rs2000,895505",
    "$simlib,2,TIM.BR,191.6.4.114,40001,0,rs2000,rs2000,895502",
    "$simlib,3,smart.m2m.vivo.com.br,191.6.4.114,40001,1,vivo,vivo,895506",
    "$simlib,4,gprs.oi.com.br,191.6.4.114,40001,0,rs2000,rs2000,895531",
    "$simlib,5,zap.vivo.com.br,191.6.4.114,40001,1,vivo,vivo,895511",
    "$simlib,6,zap.vivo.com.br,191.6.4.114,40001,1,vivo,vivo,895523",
    "$protocols,1,11,99,0,1",
    "$CHANNELS,1,6",
    "$scheds,1,6,31,0,86400",
    "$scheds,1,3,10,0,900",
    "$scheds,1,4,93,0,600",
    "$scheds,1,7,30,01112025000000,1",
];

const SAO_PAULO: &[&str] = &[
    "$userdef,----,CLIENTE SP,00000000",
    "$simlib,1,APN.SP.COM.BR,10.0.0.1,40001,0,user,pass,12345",
];

const RIO_DE_JANEIRO: &[&str] = &[
    "$userdef,----,CLIENTE RJ,00000000",
    "$simlib,1,APN.RJ.COM.BR,10.0.0.2,40001,0,user,pass,67890",
];

/// A deployment region with a built-in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionProfile {
    /// Mato Grosso (Energisa)
    MatoGrosso,
    /// São Paulo (example)
    SaoPaulo,
    /// Rio de Janeiro (example)
    RioDeJaneiro,
}

impl RegionProfile {
    /// All profiles in menu order
    pub const ALL: [RegionProfile; 3] = [
        RegionProfile::MatoGrosso,
        RegionProfile::SaoPaulo,
        RegionProfile::RioDeJaneiro,
    ];

    /// Label shown in the menu
    pub fn label(&self) -> &'static str {
        match self {
            RegionProfile::MatoGrosso => "Mato Grosso (Energisa)",
            RegionProfile::SaoPaulo => "Sao Paulo (Example)",
            RegionProfile::RioDeJaneiro => "Rio de Janeiro (Example)",
        }
    }

    fn lines(&self) -> &'static [&'static str] {
        match self {
            RegionProfile::MatoGrosso => MATO_GROSSO,
            RegionProfile::SaoPaulo => SAO_PAULO,
            RegionProfile::RioDeJaneiro => RIO_DE_JANEIRO,
        }
    }

    /// The profile's command set
    pub fn commands(&self) -> Result<CommandSet, ProtocolError> {
        CommandSet::new(self.label(), self.lines().iter().copied())
    }
}

impl fmt::Display for RegionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_profiles_build() {
        for profile in RegionProfile::ALL {
            let set = profile.commands().unwrap();
            assert!(!set.is_empty(), "{profile} has no commands");
            assert!(set.iter().all(|c| c.as_str().starts_with('$')));
        }
    }

    #[test]
    fn test_mato_grosso_channels_before_schedules() {
        let set = RegionProfile::MatoGrosso.commands().unwrap();
        let texts: Vec<&str> = set.iter().map(|c| c.as_str()).collect();
        let channels = texts.iter().position(|c| c.starts_with("$CHANNELS")).unwrap();
        let first_sched = texts.iter().position(|c| c.starts_with("$scheds")).unwrap();
        assert!(channels < first_sched);
    }
}
