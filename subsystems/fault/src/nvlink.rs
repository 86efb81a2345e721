//! # NVLink Handlers
//!
//! One NVLIPT instance fronts the link-management controller, the data
//! link (DL), the transaction layer (TLC) and its own IP-level banks for
//! each of its links. The SAW summary carries a single bit per instance,
//! so every pass walks all of them and lets the leaves decide.
//!
//! A link the registry does not know, or one held in reset, is not
//! touched: its DL and TLC registers are not clocked.

use nvswitch_core::{LinkId, LinkMask, ServiceStatus, Severity};
use nvswitch_hal::ErrorUnit;

use crate::device::Device;
use crate::handler::{Subject, UnitInstance};
use crate::state::DeviceState;

impl Device<'_> {
    /// Service NVLIPT `instance` on one tree
    pub(crate) fn service_nvlipt(
        &self,
        state: &mut DeviceState,
        instance: u32,
        severity: Severity,
    ) -> ServiceStatus {
        let links = self.topology.nvlipt_links(instance);
        let serviceable: LinkMask = links
            .iter()
            .filter(|&link| self.is_link_serviceable(link))
            .collect();

        let per_link = |units: &'static [ErrorUnit]| {
            serviceable
                .iter()
                .flat_map(move |link| units.iter().map(move |&unit| UnitInstance::link(unit, link)))
        };

        // The controller's link interrupts ride the fatal and non-fatal trees
        let mut status = match severity {
            Severity::Fatal | Severity::NonFatal => self.service_minion_link(state, instance),
            Severity::Correctable => ServiceStatus::NotFound,
        };
        status = status.combine(self.service_units(state, per_link(&[ErrorUnit::Nvldl]), severity));

        let common = UnitInstance {
            unit: ErrorUnit::NvliptCommon,
            instance,
            sub: 0,
            subject: Subject::Links(links),
        };
        match severity {
            Severity::Fatal => {
                status = status.combine(self.service_units(
                    state,
                    per_link(&ErrorUnit::NVLTLC_FATAL),
                    severity,
                ));
                status = status.combine(self.service_minion_fatal(state, instance));
                status = status.combine(self.service_unit(state, common, severity));
            }
            Severity::NonFatal => {
                status = status.combine(self.service_units(
                    state,
                    per_link(&ErrorUnit::NVLTLC_NONFATAL),
                    severity,
                ));
            }
            Severity::Correctable => {
                status = status.combine(self.service_units(
                    state,
                    per_link(&ErrorUnit::NVLTLC),
                    severity,
                ));
                status = status.combine(self.service_unit(state, common, severity));
            }
        }

        status.combine(self.service_units(state, per_link(&[ErrorUnit::NvliptLnk]), severity))
    }

    /// Whether the link's NVLink registers may be accessed
    fn is_link_serviceable(&self, link: LinkId) -> bool {
        if !self.topology.is_valid(link) {
            return false;
        }
        match self.platform.links.get_link(link) {
            Some(handle) => !self.platform.links.is_link_in_reset(handle),
            None => false,
        }
    }
}
