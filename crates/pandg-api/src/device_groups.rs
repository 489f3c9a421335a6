// Device group and tag endpoints
//
// Both are plain reads of the running configuration. Panorama reports an
// unconfigured subtree as error code 7 ("No such node"); that is an empty
// listing here, not a failure.

use tracing::debug;

use crate::client::PanoramaClient;
use crate::error::Error;
use crate::models::{DeviceGroupEntry, TagEntry};
use crate::xml::XmlNode;

/// Device groups on a Panorama appliance.
pub const DEVICE_GROUP_XPATH: &str =
    "/config/devices/entry[@name='localhost.localdomain']/device-group";

/// Tag objects defined in the shared scope.
pub const SHARED_TAG_XPATH: &str = "/config/shared/tag";

/// Panorama error code for a missing configuration node.
const NO_SUCH_NODE: &str = "7";

impl PanoramaClient {
    /// List every device group in the running configuration.
    pub async fn list_device_groups(&self) -> Result<Vec<DeviceGroupEntry>, Error> {
        let Some(result) = self.show_optional(DEVICE_GROUP_XPATH).await? else {
            return Ok(Vec::new());
        };
        let groups: Vec<DeviceGroupEntry> = entries(&result, "device-group")
            .map(DeviceGroupEntry::from_xml)
            .collect();
        debug!(count = groups.len(), "listed device groups");
        Ok(groups)
    }

    /// List tag objects defined in the shared scope.
    pub async fn list_shared_tags(&self) -> Result<Vec<TagEntry>, Error> {
        let Some(result) = self.show_optional(SHARED_TAG_XPATH).await? else {
            return Ok(Vec::new());
        };
        let tags: Vec<TagEntry> = entries(&result, "tag")
            .filter_map(TagEntry::from_xml)
            .collect();
        debug!(count = tags.len(), "listed shared tags");
        Ok(tags)
    }

    async fn show_optional(&self, xpath: &str) -> Result<Option<XmlNode>, Error> {
        match self.show_config(xpath).await {
            Ok(result) => Ok(Some(result)),
            Err(Error::Api { code, .. }) if code.as_deref() == Some(NO_SUCH_NODE) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// `<entry>` elements under `<result><container>`, or directly under
/// `<result>` when the device omits the container element.
fn entries<'a>(result: &'a XmlNode, container: &'a str) -> impl Iterator<Item = &'a XmlNode> {
    result
        .children_named(container)
        .flat_map(|c| c.children_named("entry"))
        .chain(result.children_named("entry"))
}
