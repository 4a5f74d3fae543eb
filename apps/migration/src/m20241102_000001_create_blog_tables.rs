use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id(Users::Id))
                    .col(ColumnDef::new(Users::Username).string_len(150).not_null().unique_key())
                    .col(ColumnDef::new(Users::FirstName).string_len(150).not_null().default(""))
                    .col(ColumnDef::new(Users::LastName).string_len(150).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(id(Categories::Id))
                    .col(ColumnDef::new(Categories::Name).string_len(255).not_null())
                    .col(slug(Categories::Slug))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tags::Table)
                    .if_not_exists()
                    .col(id(Tags::Id))
                    .col(ColumnDef::new(Tags::Name).string_len(255).not_null())
                    .col(slug(Tags::Slug))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pages::Table)
                    .if_not_exists()
                    .col(id(Pages::Id))
                    .col(ColumnDef::new(Pages::Title).string_len(65).not_null())
                    .col(slug(Pages::Slug))
                    .col(ColumnDef::new(Pages::Content).text().not_null())
                    .col(
                        ColumnDef::new(Pages::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(id(Posts::Id))
                    .col(ColumnDef::new(Posts::Title).string_len(65).not_null())
                    .col(slug(Posts::Slug))
                    .col(ColumnDef::new(Posts::Excerpt).string_len(150).not_null())
                    .col(ColumnDef::new(Posts::Content).text().not_null())
                    .col(ColumnDef::new(Posts::Cover).string_len(255).not_null().default(""))
                    .col(
                        ColumnDef::new(Posts::CoverInPostContent)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Posts::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Posts::CategoryId).big_integer().null())
                    .col(ColumnDef::new(Posts::CreatedById).big_integer().null())
                    .col(ColumnDef::new(Posts::UpdatedById).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_category")
                            .from(Posts::Table, Posts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_created_by")
                            .from(Posts::Table, Posts::CreatedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_updated_by")
                            .from(Posts::Table, Posts::UpdatedById)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PostTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PostTags::PostId).big_integer().not_null())
                    .col(ColumnDef::new(PostTags::TagId).big_integer().not_null())
                    .primary_key(Index::create().col(PostTags::PostId).col(PostTags::TagId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tags_post")
                            .from(PostTags::Table, PostTags::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_tags_tag")
                            .from(PostTags::Table, PostTags::TagId)
                            .to(Tags::Table, Tags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteSetups::Table)
                    .if_not_exists()
                    .col(id(SiteSetups::Id))
                    .col(ColumnDef::new(SiteSetups::Title).string_len(65).not_null())
                    .col(ColumnDef::new(SiteSetups::Description).string_len(255).not_null())
                    .col(flag(SiteSetups::ShowHeader))
                    .col(flag(SiteSetups::ShowSearch))
                    .col(flag(SiteSetups::ShowMenu))
                    .col(flag(SiteSetups::ShowDescription))
                    .col(flag(SiteSetups::ShowPagination))
                    .col(flag(SiteSetups::ShowFooter))
                    .col(ColumnDef::new(SiteSetups::Favicon).string_len(255).not_null().default(""))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MenuLinks::Table)
                    .if_not_exists()
                    .col(id(MenuLinks::Id))
                    .col(ColumnDef::new(MenuLinks::Text).string_len(50).not_null())
                    .col(ColumnDef::new(MenuLinks::UrlOrPath).string_len(2048).not_null())
                    .col(
                        ColumnDef::new(MenuLinks::NewTab)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(MenuLinks::SiteSetupId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_links_site_setup")
                            .from(MenuLinks::Table, MenuLinks::SiteSetupId)
                            .to(SiteSetups::Table, SiteSetups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_published_id")
                    .table(Posts::Table)
                    .col(Posts::IsPublished)
                    .col(Posts::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MenuLinks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SiteSetups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PostTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn id<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn slug<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .string_len(255)
        .not_null()
        .unique_key()
        .to_owned()
}

fn flag<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .boolean()
        .not_null()
        .default(true)
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    FirstName,
    LastName,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(DeriveIden)]
enum Pages {
    Table,
    Id,
    Title,
    Slug,
    Content,
    IsPublished,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    Cover,
    CoverInPostContent,
    IsPublished,
    CreatedAt,
    UpdatedAt,
    CategoryId,
    CreatedById,
    UpdatedById,
}

#[derive(DeriveIden)]
enum PostTags {
    Table,
    PostId,
    TagId,
}

#[derive(DeriveIden)]
enum SiteSetups {
    Table,
    Id,
    Title,
    Description,
    ShowHeader,
    ShowSearch,
    ShowMenu,
    ShowDescription,
    ShowPagination,
    ShowFooter,
    Favicon,
}

#[derive(DeriveIden)]
enum MenuLinks {
    Table,
    Id,
    Text,
    UrlOrPath,
    NewTab,
    SiteSetupId,
}
