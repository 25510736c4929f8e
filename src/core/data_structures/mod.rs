/*!
 * Data Structures
 * Small value types shared by the memory subsystem
 */

mod owner_id;

pub use owner_id::OwnerId;
