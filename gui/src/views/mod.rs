mod claim;
mod connect;
mod toasts;
