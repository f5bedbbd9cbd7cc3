pub mod advertisement;
pub mod card;
pub mod community;
pub mod directory;
pub mod notification;
pub mod user;

pub use advertisement::{Advertisement, AdvertisementChanges, NewAdvertisement};
pub use card::{Card, CardChanges, CardWithCommunity, NewCard};
pub use community::{Community, CommunityChanges, NewCommunity};
pub use directory::{Directory, DirectoryChanges, NewDirectory};
pub use notification::{NewNotification, Notification, NotificationChanges};
pub use user::{NewUser, User, UserChanges};
