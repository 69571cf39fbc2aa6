pub mod wemix;
